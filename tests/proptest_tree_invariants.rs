//! Property-based invariant tests for menu trees.
//!
//! Random trees are assembled from a list of operations, then checked for invariants that
//! must hold for any shape:
//!
//! 1. Every item has a non-empty name, unique among its siblings.
//! 2. A rejected explicit name really collides with a sibling.
//! 3. `path()` starts at the root, ends at the item and has `depth + 1` elements.
//! 4. After a refresh, an item is in-path exactly when it or a descendant is active.
//! 5. The parameter cascade reaches every item needing the key and no other.
//! 6. `find_upper()` returns the root or a strict ancestor of the first current item.

use navmenu_core::{
    link::{Link, LinkArgs, RouteTable},
    menu::{MenuId, MenuTree},
    MenuError,
};
use proptest::prelude::*;
use serde_json::json;

const NAMES: [&str; 5] = ["a", "b", "menu", "menu_1", "detail"];
const TARGETS: [&str; 4] = ["Page:one", "Page:two", "Page:three", "Other:default"];

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct AddOp {
    parent: usize,
    name: Option<usize>,
    target: Option<usize>,
    needs_param: bool,
    currentable: bool,
}

fn op_strategy() -> impl Strategy<Value = AddOp> {
    (
        any::<usize>(),
        proptest::option::of(0..NAMES.len()),
        proptest::option::of(0..TARGETS.len()),
        any::<bool>(),
        prop::bool::weighted(0.8),
    )
        .prop_map(|(parent, name, target, needs_param, currentable)| AddOp {
            parent,
            name,
            target,
            needs_param,
            currentable,
        })
}

fn routes() -> RouteTable {
    RouteTable::new()
        .route("Home:default", "/")
        .route("Page:one", "/one")
        .route("Page:two", "/two/{id}")
        .route("Page:three", "/three")
        .route("Other:default", "/other")
}

/// Apply `ops`, returning the tree and every item in creation order.
fn build(ops: &[AddOp]) -> (MenuTree, Vec<MenuId>) {
    let mut tree = MenuTree::new("Home", Some(Link::parse("Home:default")));
    let mut items = vec![tree.root()];
    for op in ops {
        let parent = items[op.parent % items.len()];
        let name = op.name.map(|index| NAMES[index]);
        let link = op.target.map(|index| Link::parse(TARGETS[index]));
        match tree.add_child(parent, "Item", link, LinkArgs::new(), name) {
            Ok(id) => {
                if op.needs_param {
                    tree.node_mut(id).set_link_param_needed("id", None, "id");
                }
                tree.node_mut(id).set_currentable(op.currentable);
                items.push(id);
            }
            Err(MenuError::DuplicateName { name, .. }) => {
                assert!(tree.child(parent, &name).is_some());
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    (tree, items)
}

fn is_ancestor_or_self(tree: &MenuTree, ancestor: MenuId, id: MenuId) -> bool {
    tree.path(id).contains(&ancestor)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Sibling names are unique and never empty
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sibling_names_unique(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (tree, items) = build(&ops);
        prop_assert_eq!(items.len(), tree.len());
        for id in &items {
            let mut names = tree
                .children(*id)
                .into_iter()
                .map(|child| tree.name(child).to_string())
                .collect::<Vec<_>>();
            prop_assert!(names.iter().all(|name| !name.is_empty()));
            let count = names.len();
            names.sort();
            names.dedup();
            prop_assert_eq!(names.len(), count, "duplicate sibling names below {}", tree.name(*id));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Paths run from the root to the item
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn path_matches_depth(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (tree, items) = build(&ops);
        for id in items {
            let path = tree.path(id);
            prop_assert_eq!(path.len(), tree.depth(id) + 1);
            prop_assert_eq!(path[0], tree.root());
            prop_assert_eq!(*path.last().unwrap(), id);
            for pair in path.windows(2) {
                prop_assert_eq!(tree.parent(pair[1]), Some(pair[0]));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. In-path marks exactly the active items and their ancestors
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn in_path_follows_active_items(
        ops in prop::collection::vec(op_strategy(), 0..40),
        current in 0..TARGETS.len(),
    ) {
        let (mut tree, items) = build(&ops);
        let mut routes = routes();
        routes.set_current(TARGETS[current], LinkArgs::new());
        tree.refresh_active_state(&routes).unwrap();

        let active = items
            .iter()
            .copied()
            .filter(|id| tree.node(*id).is_active())
            .collect::<Vec<_>>();
        for id in &items {
            let expected = active
                .iter()
                .any(|active| is_ancestor_or_self(&tree, *id, *active));
            prop_assert_eq!(tree.node(*id).is_in_path(), expected, "item {}", tree.name(*id));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. The parameter cascade reaches exactly the items needing the key
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cascade_reaches_needing_items(
        ops in prop::collection::vec(op_strategy(), 0..40),
        value in 1i64..1000,
    ) {
        let (mut tree, items) = build(&ops);
        let routes = routes();
        let root = tree.root();
        tree.set_link_param(root, "id", json!(value));

        for id in items {
            let node = tree.node(id);
            match node.link_param() {
                Some(_) => prop_assert_eq!(node.link_param_value(), Some(&json!(value))),
                None => prop_assert_eq!(node.link_param_value(), None),
            }
            let target = node.link().and_then(Link::target);
            if node.link_param().is_some() && target == Some("Page:two") {
                let expected = format!("/two/{value}");
                let url = tree.url(id, &routes);
                prop_assert_eq!(url.as_deref(), Some(expected.as_str()));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. The "back" target is an ancestor of the current item
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn upper_is_an_ancestor(
        ops in prop::collection::vec(op_strategy(), 0..40),
        current in 0..TARGETS.len(),
    ) {
        let (mut tree, _) = build(&ops);
        let mut routes = routes();
        routes.set_current(TARGETS[current], LinkArgs::new());
        tree.refresh_active_state(&routes).unwrap();
        let root = tree.root();

        match tree.find_current(root).first().copied() {
            None => {
                prop_assert_eq!(tree.find_upper(&routes), None);
                prop_assert_eq!(tree.current_path(root), vec![root]);
            }
            Some(current) => {
                prop_assert_eq!(tree.current_path(root), tree.path(current));
                if let Some(upper) = tree.find_upper(&routes) {
                    prop_assert_ne!(upper, current);
                    prop_assert!(is_ancestor_or_self(&tree, upper, current));
                    if upper != root {
                        prop_assert!(tree.node(upper).is_currentable());
                        let upper_url = tree.url(upper, &routes);
                        prop_assert!(upper_url.is_some());
                        prop_assert_ne!(upper_url, tree.url(current, &routes));
                    }
                }
            }
        }
    }
}
