mod common;

use common::*;
use copy_code::{ARIA_LABEL, Options, Position, attach};
use dom::build::{code_block, elem, text};
use proptest::prelude::*;

#[test]
fn attaches_one_control_per_eligible_block() {
    let (mut page, _) = memory_page(vec![
        code_block("a"),
        elem("div", vec![], vec![elem("code", vec![], vec![text("inline")])]),
        code_block("b"),
    ]);
    let teardown = attach(&mut page, None, &Options::default());
    assert_eq!(teardown.len(), 2);
    assert_eq!(page.control_count(), 2);

    let doc = page.document();
    for pre in pres(doc) {
        let last = *doc.children(pre).last().unwrap();
        assert!(doc.has_class(last, "copy-code-button-container"));
        assert!(doc.has_class(last, "copy-code-button-container-element"));
        assert!(doc.has_class(last, "copy-code-position-tr"));
        assert_eq!(css::inline_property(doc, pre, "position").as_deref(), Some("relative"));
    }
    teardown.run(&mut page);
}

#[test]
fn default_selector_needs_code_directly_in_pre() {
    // `pre code` matches the nested code too, but its parent is not a pre
    let nested = elem(
        "pre",
        vec![],
        vec![elem("span", vec![], vec![elem("code", vec![], vec![text("x")])])],
    );
    let (mut page, _) = memory_page(vec![nested]);
    let teardown = attach(&mut page, None, &Options::default());
    assert!(teardown.is_empty());
    assert!(with_class(page.document(), "copy-code-button-element").is_empty());
    teardown.run(&mut page);
}

#[test]
fn two_code_elements_in_one_pre_get_one_control() {
    let pre = elem(
        "pre",
        vec![],
        vec![
            elem("code", vec![], vec![text("a")]),
            elem("code", vec![], vec![text("b")]),
        ],
    );
    let (mut page, _) = memory_page(vec![pre]);
    let teardown = attach(&mut page, None, &Options::default());
    assert_eq!(teardown.len(), 1);
    teardown.run(&mut page);
}

#[test]
fn reattaching_adds_nothing() {
    let (mut page, _) = memory_page(vec![code_block("a"), code_block("b")]);
    let first = attach(&mut page, None, &Options::default());
    let second = attach(&mut page, None, &Options::default());
    assert_eq!(first.len(), 2);
    assert!(second.is_empty());
    assert_eq!(with_class(page.document(), "copy-code-button-element").len(), 2);
    second.run(&mut page);
    assert_eq!(with_class(page.document(), "copy-code-button-element").len(), 2);
    first.run(&mut page);
}

#[test]
fn markers_survive_custom_class_names() {
    let options = Options::new()
        .with_container_class_name("corner")
        .with_button_class_name("btn")
        .with_position(Position::BottomLeft);
    let (mut page, _) = memory_page(vec![code_block("a")]);
    let teardown = attach(&mut page, None, &options);
    let control = &teardown.controls()[0];
    let doc = page.document();
    assert_eq!(
        doc.attribute(control.container, "class"),
        Some("corner copy-code-position-bl copy-code-button-container-element")
    );
    assert_eq!(doc.attribute(control.button, "class"), Some("btn copy-code-button-element"));
    assert_eq!(doc.attribute(control.button, "aria-label"), Some(ARIA_LABEL));
    teardown.run(&mut page);
}

#[test]
fn teardown_restores_tree_except_position() {
    let (mut page, _) = memory_page(vec![
        code_block("one"),
        elem("p", vec![], vec![text("prose")]),
        code_block("two"),
    ]);
    let body = body(&page);
    let before = snapshot_without_pre_style(page.document(), body);
    let listeners_before = page.document().total_listener_count();

    let teardown = attach(&mut page, None, &Options::default());
    assert_ne!(snapshot_without_pre_style(page.document(), body), before);
    teardown.run(&mut page);

    assert_eq!(snapshot_without_pre_style(page.document(), body), before);
    assert_eq!(page.document().total_listener_count(), listeners_before);
    assert_eq!(page.listener_count(), 0);
    assert_eq!(page.control_count(), 0);
    for pre in pres(page.document()) {
        assert_eq!(
            css::inline_property(page.document(), pre, "position").as_deref(),
            Some("relative")
        );
    }
}

#[test]
fn teardown_skips_controls_removed_by_someone_else() {
    let (mut page, _) = memory_page(vec![code_block("a"), code_block("b")]);
    let teardown = attach(&mut page, None, &Options::default());
    let gone = teardown.controls()[0].pre;
    page.document_mut().remove(gone).unwrap();
    teardown.run(&mut page);
    assert!(with_class(page.document(), "copy-code-button-element").is_empty());
}

#[test]
fn selector_matching_nothing_is_a_noop() {
    let (mut page, _) = memory_page(vec![code_block("a")]);
    let options = Options::new().with_selector("article code");
    let teardown = attach(&mut page, None, &options);
    assert!(teardown.is_empty());
    let body = body(&page);
    let snapshot = page.document().materialize(body).unwrap().without_ids();
    teardown.run(&mut page);
    assert_eq!(page.document().materialize(body).unwrap().without_ids(), snapshot);
}

#[test]
fn invalid_selector_yields_empty_attachment() {
    let (mut page, _) = memory_page(vec![code_block("a")]);
    let teardown = attach(&mut page, None, &Options::new().with_selector("pre >"));
    assert!(teardown.is_empty());
    assert_eq!(page.control_count(), 0);
    teardown.run(&mut page);
}

#[test]
fn invalid_class_prefix_yields_empty_attachment() {
    let (mut page, _) = memory_page(vec![code_block("a")]);
    let body = body(&page);
    let before = page.document().materialize(body).unwrap().without_ids();
    let options = Options::new().with_class_prefix("my code");

    let first = attach(&mut page, None, &options);
    let second = attach(&mut page, None, &options);
    assert!(first.is_empty());
    assert!(second.is_empty());
    assert_eq!(page.control_count(), 0);
    assert_eq!(page.document().materialize(body).unwrap().without_ids(), before);
    first.run(&mut page);
    second.run(&mut page);
    assert_eq!(page.document().materialize(body).unwrap().without_ids(), before);
}

#[test]
fn prefixes_attach_and_tear_down_independently() {
    let (mut page, _) = memory_page(vec![code_block("a")]);
    let other = Options::new().with_class_prefix("other");
    let default = attach(&mut page, None, &Options::default());
    let prefixed = attach(&mut page, None, &other);
    assert_eq!(default.len(), 1);
    assert_eq!(prefixed.len(), 1);
    let pre = default.controls()[0].pre;
    assert_eq!(prefixed.controls()[0].pre, pre);

    // each naming scheme stays idempotent on its own
    let again = attach(&mut page, None, &other);
    assert!(again.is_empty());
    again.run(&mut page);

    prefixed.run(&mut page);
    assert!(with_class(page.document(), "other-button-element").is_empty());
    assert_eq!(with_class(page.document(), "copy-code-button-element").len(), 1);
    default.run(&mut page);
    assert_eq!(page.document().children(pre).len(), 1);
}

#[test]
fn scan_is_limited_to_scope() {
    let (mut page, _) = memory_page(vec![
        elem("section", vec![("id", "docs")], vec![code_block("inside")]),
        code_block("outside"),
    ]);
    let section = find(page.document(), |d, id| d.attribute(id, "id") == Some("docs")).unwrap();
    let teardown = attach(&mut page, Some(section), &Options::default());
    assert_eq!(teardown.len(), 1);
    let block = teardown.controls()[0].block;
    assert_eq!(page.document().text_content(block), "inside");
    teardown.run(&mut page);
}

#[test]
fn removed_scope_attaches_nothing() {
    let (mut page, _) = memory_page(vec![elem("section", vec![], vec![code_block("x")])]);
    let section = find(page.document(), |d, id| d.is_element_named(id, "section")).unwrap();
    page.document_mut().remove(section).unwrap();
    let teardown = attach(&mut page, Some(section), &Options::default());
    assert!(teardown.is_empty());
    teardown.run(&mut page);
}

#[test]
fn stylesheet_is_injected_once() {
    let (mut page, _) = memory_page(vec![code_block("a")]);
    let first = attach(&mut page, None, &Options::default());
    first.run(&mut page);
    let second = attach(&mut page, None, &Options::default());
    let styles = all(page.document(), |d, id| {
        d.attribute(id, "id") == Some("copy-code-styles")
    });
    assert_eq!(styles.len(), 1);
    let head = page.document().head().unwrap();
    assert_eq!(page.document().parent(styles[0]), Some(head));
    second.run(&mut page);
    // never removed
    assert!(page.document().element_by_id_attr(head, "copy-code-styles").is_some());
}

#[test]
fn existing_inline_style_is_kept() {
    let pre = elem(
        "pre",
        vec![("style", "color: red; position: static;")],
        vec![elem("code", vec![], vec![text("x")])],
    );
    let (mut page, _) = memory_page(vec![pre]);
    let teardown = attach(&mut page, None, &Options::default());
    let pre = teardown.controls()[0].pre;
    assert_eq!(
        css::get_inline_style(page.document(), pre),
        Some("color: red; position: relative;")
    );
    teardown.run(&mut page);
}

fn eligible(n: usize) -> Vec<dom::Node> {
    (0..n).map(|i| code_block(&format!("block {i}"))).collect()
}

fn ineligible(m: usize) -> Vec<dom::Node> {
    (0..m)
        .map(|i| {
            let code = elem("code", vec![], vec![text(&format!("stray {i}"))]);
            if i % 2 == 0 {
                elem("p", vec![], vec![code])
            } else {
                elem("pre", vec![], vec![elem("div", vec![], vec![code])])
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn n_eligible_and_m_ineligible_give_n_controls(n in 0usize..8, m in 0usize..8, seed in any::<u64>()) {
        let mut content: Vec<_> = eligible(n).into_iter().chain(ineligible(m)).collect();
        // deterministic shuffle so eligible blocks are not always first
        let len = content.len();
        if len > 1 {
            for i in (1..len).rev() {
                let j = (seed.rotate_left(i as u32) % (i as u64 + 1)) as usize;
                content.swap(i, j);
            }
        }
        let (mut page, _) = memory_page(content);
        let teardown = attach(&mut page, None, &Options::default());
        prop_assert_eq!(teardown.len(), n);
        prop_assert_eq!(with_class(page.document(), "copy-code-button-element").len(), n);
        let again = attach(&mut page, None, &Options::default());
        prop_assert!(again.is_empty());
        again.run(&mut page);
        teardown.run(&mut page);
        prop_assert_eq!(page.control_count(), 0);
    }
}
