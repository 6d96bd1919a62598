/// Builds an editor by typing each character of a string in turn.
macro_rules! typed {
    ($s:expr) => { {
        let mut editor = crate::Editor::new();
        for c in $s.chars() {
            editor.insert_char(c).unwrap();
        }
        editor
    } };
}

/// Types a string and returns the compact semantic form of the result.
macro_rules! serialized {
    ($s:expr) => {
        alloc::string::ToString::to_string(&typed!($s).serialize().unwrap())
    };
}

/// Types a string and returns the error from serializing it.
macro_rules! serialize_err {
    ($s:expr) => {
        typed!($s).serialize().unwrap_err()
    };
}

/// Reads a semantic string into a fresh editor, then serializes it again.
macro_rules! reserialize {
    ($s:expr) => {
        alloc::string::ToString::to_string(
            &crate::Editor::from_semantic($s).unwrap().serialize().unwrap()
        )
    };
}

/// Returns the precis of an expression, unwrapped.
macro_rules! precis {
    ($tree:expr, $expr:expr) => {
        $tree.precis($expr).unwrap()
    };
}

/// Builds a fraction by typing into an empty numerator, moving down, then typing into the
/// denominator.
pub fn fraction(numerator: &str, denominator: &str) -> crate::Editor {
    let mut editor = crate::Editor::with_settings(crate::EditorSettings {
        collect_numerator: false,
        ..Default::default()
    });

    editor.insert_char('/').unwrap();
    for c in numerator.chars() {
        editor.insert_char(c).unwrap();
    }
    editor.navigate(crate::Direction::Down).unwrap();
    for c in denominator.chars() {
        editor.insert_char(c).unwrap();
    }
    editor
}

/// Returns the (numerator, denominator) of a division unit.
pub fn division_parts(tree: &crate::Tree, id: crate::NodeId) -> (crate::NodeId, crate::NodeId) {
    match tree.unit(id).unwrap() {
        crate::Unit::Division { numerator, denominator } => (numerator, denominator),
        other => panic!("expected a division, got {:?}", other),
    }
}

/// ```text
///   1
///   - + x^y √z
///   2
/// ```
///
/// Returns the editor, and the ids of the division, the exponent and the square root.
pub fn mixed_expression() -> (crate::Editor, crate::NodeId, crate::NodeId, crate::NodeId) {
    use crate::Direction;

    let mut editor = crate::Editor::new();
    editor.insert_char('1').unwrap();
    let division = editor.insert_char('/').unwrap();
    editor.insert_char('2').unwrap();
    editor.navigate(Direction::Right).unwrap();
    editor.insert_char('+').unwrap();
    editor.insert_char('x').unwrap();
    let exponent = editor.insert_char('^').unwrap();
    editor.insert_char('y').unwrap();
    editor.navigate(Direction::Right).unwrap();
    let root = editor.insert_name("sqrt").unwrap();
    editor.insert_char('z').unwrap();
    editor.navigate(Direction::Right).unwrap();

    (editor, division, exponent, root)
}
