//! `schema!` expansion mounted into a live tree.
#![cfg(feature = "macros")]

use arbor_forms::testing::tree_to_string;
use arbor_forms::{schema, FormTree, UNBOUNDED};
use serde_json::json;

#[test]
fn schema_macro_builds_mountable_tree() {
    let mut tree = FormTree::new();
    let root = tree
        .mount(
            None,
            schema! {
                <order label="Order">
                    <customer>
                        <email help="We send the receipt here" />
                    </customer>
                    <line min_occurs=1 max_occurs="unbounded">
                        <sku />
                        <qty name="quantity" min_occurs=0 />
                    </line>
                    <payment choice=true>
                        <card />
                        <iban />
                    </payment>
                </order>
            },
        )
        .unwrap();

    insta::assert_snapshot!(tree_to_string(&tree, root).unwrap(), @r"
    order
    -- customer
    ---- email
    -- line [1..*]
    ---- sku
    ---- quantity [0..1]
    -- payment (choice)
    ---- card
    ---- iban
    ");

    let line = tree.find_child(root, "line").unwrap();
    assert_eq!(tree.get(line).unwrap().max_occurs, UNBOUNDED);
    assert_eq!(tree.get(root).unwrap().label(), "Order");
}

#[test]
fn macro_tree_validates() {
    let mut tree = FormTree::new();
    tree.mount(
        None,
        schema! {
            <signup>
                <user />
                <nickname min_occurs=0 />
            </signup>
        },
    )
    .unwrap();

    let errors = tree.validate_submission(json!({"nickname": "ada"})).unwrap();
    assert_eq!(errors.keys().collect::<Vec<_>>(), ["signup__user"]);
}
