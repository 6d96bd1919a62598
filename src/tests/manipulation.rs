use pretty_assertions::assert_eq;

use crate::{
    editor::collect_numerator, tests::util::division_parts, Direction, Editor, EditorSettings,
    Error, NodeSpec, Tree,
};

#[test]
fn test_insert_moves_cursor() {
    let mut editor = Editor::new();

    let one = editor.insert_char('1').unwrap();
    assert_eq!(editor.cursor(), one);

    let exponent = editor.insert_char('^').unwrap();
    let exponent_expr = editor.tree().unit(exponent).unwrap().sub_expressions()[0];
    assert_eq!(editor.cursor(), editor.tree().first(exponent_expr).unwrap());

    editor.navigate(Direction::Right).unwrap();
    let root = editor.insert_name("sqrt").unwrap();
    let radicand = editor.tree().unit(root).unwrap().sub_expressions()[0];
    assert_eq!(editor.cursor(), editor.tree().first(radicand).unwrap());

    assert_eq!(editor.precis().unwrap(), "_1^%");
}

#[test]
fn test_collect_numerator() {
    // 12/ collects both digits as one run, and leaves the cursor in the denominator
    let mut editor = typed!("12");
    let division = editor.insert_char('/').unwrap();
    let tree = editor.tree();
    let (numerator, denominator) = division_parts(tree, division);

    assert_eq!(precis!(tree, tree.root()), "_%");
    assert_eq!(precis!(tree, numerator), "_12");
    assert_eq!(editor.cursor(), tree.first(denominator).unwrap());

    // Only the run of letters and digits at the end is collected
    let editor = typed!("2+x3/");
    let tree = editor.tree();
    assert_eq!(precis!(tree, tree.root()), "_2+%");
    let (numerator, _) = division_parts(tree, tree.last(tree.root()).unwrap());
    assert_eq!(precis!(tree, numerator), "_x3");
}

#[test]
fn test_collect_numerator_brackets() {
    let editor = typed!("3(1+2)/");
    let tree = editor.tree();
    let (numerator, _) = division_parts(tree, tree.last(tree.root()).unwrap());

    assert_eq!(precis!(tree, tree.root()), "_3%");
    assert_eq!(precis!(tree, numerator), "_(1+2)");

    let editor = typed!("((1)(2))/");
    let tree = editor.tree();
    let (numerator, _) = division_parts(tree, tree.last(tree.root()).unwrap());
    assert_eq!(precis!(tree, tree.root()), "_%");
    assert_eq!(precis!(tree, numerator), "_((1)(2))");
}

#[test]
fn test_collect_numerator_nothing_to_collect() {
    // An operator stops collection, and the cursor goes to the numerator instead
    let mut editor = typed!("1+");
    let division = editor.insert_char('/').unwrap();
    let (numerator, _) = division_parts(editor.tree(), division);
    assert_eq!(precis!(editor.tree(), numerator), "_");
    assert_eq!(editor.cursor(), editor.tree().first(numerator).unwrap());

    // So does an exponent
    let mut editor = typed!("x^2");
    editor.navigate(Direction::Right).unwrap();
    let division = editor.insert_char('/').unwrap();
    let (numerator, _) = division_parts(editor.tree(), division);
    assert_eq!(precis!(editor.tree(), numerator), "_");
    assert_eq!(editor.precis().unwrap(), "_x^%");

    // An unmatched bracket
    let editor = typed!("1)/");
    assert_eq!(editor.precis().unwrap(), "_1)%");

    // And an empty expression
    let editor = typed!("/");
    assert_eq!(editor.precis().unwrap(), "_%");
}

#[test]
fn test_collect_numerator_directly() {
    let mut tree = Tree::new();
    let root = tree.root();
    let mut anchor = tree.first(root).unwrap();
    for c in "ab".chars() {
        let id = tree.create(NodeSpec::Atom(c));
        tree.insert_after(anchor, id).unwrap();
        anchor = id;
    }
    let division = tree.create(NodeSpec::Division);
    tree.insert_after(anchor, division).unwrap();

    assert_eq!(collect_numerator(&mut tree, division), Ok(true));
    assert_eq!(collect_numerator(&mut tree, division), Ok(false));
    assert_eq!(collect_numerator(&mut tree, anchor), Err(Error::InvalidNode));
}

#[test]
fn test_collect_numerator_disabled() {
    let mut editor = Editor::with_settings(EditorSettings {
        collect_numerator: false,
        ..Default::default()
    });
    editor.insert_char('1').unwrap();
    editor.insert_char('2').unwrap();
    let division = editor.insert_char('/').unwrap();

    let (numerator, _) = division_parts(editor.tree(), division);
    assert_eq!(editor.precis().unwrap(), "_12%");
    assert_eq!(editor.cursor(), editor.tree().first(numerator).unwrap());
}

#[test]
fn test_delete_previous() {
    let mut editor = typed!("12+3");

    assert_eq!(editor.delete_previous(), Ok(true));
    assert_eq!(editor.delete_previous(), Ok(true));
    assert_eq!(editor.precis().unwrap(), "_12");
    assert_eq!(editor.cursor(), editor.tree().last(editor.tree().root()).unwrap());

    assert_eq!(editor.delete_previous(), Ok(true));
    assert_eq!(editor.delete_previous(), Ok(true));
    assert_eq!(editor.precis().unwrap(), "_");

    // Nothing left behind the cursor
    assert_eq!(editor.delete_previous(), Ok(false));
    assert_eq!(editor.precis().unwrap(), "_");
}

#[test]
fn test_delete_previous_composite() {
    let mut editor = typed!("1+");
    let division = editor.insert_char('/').unwrap();
    let (numerator, _) = division_parts(editor.tree(), division);
    editor.insert_char('x').unwrap();

    // At the start of the numerator there is nothing to delete
    editor.navigate(Direction::Left).unwrap();
    assert_eq!(editor.delete_previous(), Ok(false));

    // From after the fraction, it's deleted whole
    editor.set_cursor(division).unwrap();
    assert_eq!(editor.delete_previous(), Ok(true));
    assert_eq!(editor.precis().unwrap(), "_1+");
    assert!(!editor.tree().is_live(numerator));
    assert_eq!(editor.set_cursor(division), Err(Error::NodeNotFound));
}

#[test]
fn test_clear() {
    let mut editor = typed!("1+x");
    editor.clear();

    assert_eq!(editor.precis().unwrap(), "_");
    assert_eq!(editor.cursor(), editor.tree().first(editor.tree().root()).unwrap());
    assert_eq!(editor.serialize(), Err(Error::EmptyExpression));
}
