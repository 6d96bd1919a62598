use pretty_assertions::assert_eq;

use crate::{nav::navigate, tests::util::{division_parts, mixed_expression}, Direction, Unit};

#[test]
fn test_movement() {
    let (mut editor, division, exponent, root) = mixed_expression();
    let tree = editor.tree().clone();
    let (numerator, _) = division_parts(&tree, division);
    let root_items = tree.children(tree.root()).unwrap().to_vec();
    let exponent_expr = tree.unit(exponent).unwrap().sub_expressions()[0];
    let radicand = tree.unit(root).unwrap().sub_expressions()[0];

    // Start from the very beginning
    editor.set_cursor(root_items[0]).unwrap();

    // Go all the way to the right
    let expected_right = [
        tree.first(numerator).unwrap(),
        tree.last(numerator).unwrap(),
        division,
        root_items[2],
        root_items[3],
        tree.first(exponent_expr).unwrap(),
        tree.last(exponent_expr).unwrap(),
        exponent,
        tree.first(radicand).unwrap(),
        tree.last(radicand).unwrap(),
        root,
        root,
    ];
    for expected in expected_right {
        assert_eq!(editor.navigate(Direction::Right), Ok(expected));
    }

    // Now go back to the left
    let expected_left = [
        tree.last(radicand).unwrap(),
        tree.first(radicand).unwrap(),
        exponent,
        tree.last(exponent_expr).unwrap(),
        tree.first(exponent_expr).unwrap(),
        root_items[3],
        root_items[2],
        division,
        tree.last(numerator).unwrap(),
        tree.first(numerator).unwrap(),
        root_items[0],
        root_items[0],
    ];
    for expected in expected_left {
        assert_eq!(editor.navigate(Direction::Left), Ok(expected));
    }
}

#[test]
fn test_vertical_movement() {
    let (mut editor, division, exponent, _) = mixed_expression();
    let tree = editor.tree().clone();
    let (numerator, denominator) = division_parts(&tree, division);

    // In the numerator, up goes nowhere and down goes to the start of the denominator
    editor.set_cursor(tree.last(numerator).unwrap()).unwrap();
    assert_eq!(editor.navigate(Direction::Up), Ok(tree.last(numerator).unwrap()));
    assert_eq!(editor.navigate(Direction::Down), Ok(tree.first(denominator).unwrap()));
    assert_eq!(editor.navigate(Direction::Down), Ok(tree.first(denominator).unwrap()));
    assert_eq!(editor.navigate(Direction::Up), Ok(tree.first(numerator).unwrap()));

    // Exponents don't take part
    let exponent_expr = tree.unit(exponent).unwrap().sub_expressions()[0];
    let y = tree.last(exponent_expr).unwrap();
    assert_eq!(navigate(&tree, y, Direction::Up), Ok(y));
    assert_eq!(navigate(&tree, y, Direction::Down), Ok(y));

    // Nor does the root level
    assert_eq!(navigate(&tree, division, Direction::Down), Ok(division));
}

#[test]
fn test_vertical_movement_bubbles_out() {
    // A square root in a numerator - pressing down inside it should still reach the denominator
    let mut editor = crate::Editor::new();
    let division = editor.insert_char('/').unwrap();
    let root = editor.insert_name("sqrt").unwrap();
    let x = editor.insert_char('x').unwrap();

    let tree = editor.tree();
    let (_, denominator) = division_parts(tree, division);
    assert!(matches!(tree.unit(root), Ok(Unit::SquareRoot { .. })));
    assert_eq!(navigate(tree, x, Direction::Down), Ok(tree.first(denominator).unwrap()));
}

#[test]
fn test_right_then_left_returns() {
    let (editor, division, _, _) = mixed_expression();
    let tree = editor.tree();
    let (_, denominator) = division_parts(tree, division);
    let last_of_denominator = tree.last(denominator).unwrap();

    for id in tree.descendants(tree.root()).unwrap() {
        if tree.unit(id).is_err() {
            continue;
        }

        let right = navigate(tree, id, Direction::Right).unwrap();
        if right == id {
            // Last position in the tree
            assert_eq!(id, tree.last(tree.root()).unwrap());
            continue;
        }

        // Leaving the denominator rightwards and coming back re-enters through the numerator
        if id == last_of_denominator {
            assert_eq!(right, division);
            continue;
        }

        assert_eq!(navigate(tree, right, Direction::Left), Ok(id), "moving from {:?}", id);
    }
}
