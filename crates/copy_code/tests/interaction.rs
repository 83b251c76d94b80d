mod common;

use common::*;
use copy_code::{
    ClipboardError, CopyState, FAILURE_MESSAGE, FailingClipboard, Options, attach,
};
use dom::build::{code_block, elem, text};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn success_shows_message_then_reverts_after_timeout() {
    let (mut page, clipboard) = memory_page(vec![code_block("cargo build")]);
    let teardown = attach(&mut page, None, &Options::default());
    let button = teardown.controls()[0].button;
    assert_eq!(page.control_state(button), Some(CopyState::Idle));
    assert!(shows_copy_icon(&page, button));

    let event = page.click(button);
    assert!(event.default_prevented());
    assert_eq!(clipboard.last().as_deref(), Some("cargo build"));
    assert_eq!(page.control_state(button), Some(CopyState::Copied));
    let content = success_content(&page, button).expect("success content");
    assert_eq!(page.document().text_content(content), "Copied");
    assert!(page.document().has_class(content, "copy-code-success"));
    assert!(page.document().has_class(content, "copy-code-fade-in"));

    page.advance(ms(1999));
    assert_eq!(page.control_state(button), Some(CopyState::Copied));
    page.advance(ms(1));
    assert_eq!(page.control_state(button), Some(CopyState::Idle));
    assert!(success_content(&page, button).is_none());
    assert!(shows_copy_icon(&page, button));
    teardown.run(&mut page);
}

#[test]
fn empty_message_shows_icon_only() {
    let (mut page, _) = memory_page(vec![code_block("x")]);
    let teardown = attach(&mut page, None, &Options::new().with_copy_message(""));
    let button = teardown.controls()[0].button;
    page.click(button);
    let content = success_content(&page, button).expect("success content");
    assert_eq!(page.document().text_content(content), "");
    let doc = page.document();
    assert!(doc.children(content).iter().all(|id| doc.is_element_named(*id, "svg")));
    teardown.run(&mut page);
}

#[test]
fn restored_icon_fades_in() {
    let (mut page, _) = memory_page(vec![code_block("x")]);
    let teardown = attach(&mut page, None, &Options::default());
    let button = teardown.controls()[0].button;
    let icon = page.document().children(button)[0];
    assert_eq!(page.document().attribute(icon, "class"), None);

    page.click(button);
    page.run_until_idle();
    let icon = page.document().children(button)[0];
    assert!(page.document().has_class(icon, "copy-code-fade-in"));
    teardown.run(&mut page);
}

#[test]
fn failure_shows_indication_and_never_copies() {
    let mut page = page_with(vec![code_block("secret")], FailingClipboard::new("denied"));
    let teardown = attach(&mut page, None, &Options::default());
    let button = teardown.controls()[0].button;

    page.click(button);
    assert_eq!(page.control_state(button), Some(CopyState::Failed));
    assert_eq!(page.document().text_content(button), FAILURE_MESSAGE);
    assert!(success_content(&page, button).is_none());
    assert_eq!(with_class(page.document(), "copy-code-error").len(), 1);

    page.advance(ms(2000));
    assert_eq!(page.control_state(button), Some(CopyState::Idle));
    assert!(with_class(page.document(), "copy-code-error").is_empty());
    teardown.run(&mut page);
}

#[test]
fn failure_reverts_after_custom_timeout() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let clipboard = move |_: &str| -> Result<(), ClipboardError> {
        counter.set(counter.get() + 1);
        Err(ClipboardError::Unavailable("no clipboard".into()))
    };
    let mut page = page_with(vec![code_block("x")], clipboard);
    let options = Options::new().with_copy_message_timeout(ms(300));
    let teardown = attach(&mut page, None, &options);
    let button = teardown.controls()[0].button;
    page.click(button);
    page.advance(ms(299));
    assert_eq!(page.control_state(button), Some(CopyState::Failed));
    page.advance(ms(1));
    assert_eq!(page.control_state(button), Some(CopyState::Idle));
    assert_eq!(calls.get(), 1);
    teardown.run(&mut page);
}

fn highlight_window(timeout: u64) {
    let (mut page, _) = memory_page(vec![code_block("x")]);
    let options = Options::new()
        .with_highlight_on_copy(true)
        .with_copy_message_timeout(ms(timeout));
    let teardown = attach(&mut page, None, &options);
    let control = teardown.controls()[0].clone();

    page.click(control.button);
    assert!(page.document().has_class(control.pre, "copy-code-highlight"));
    page.advance(ms(399));
    assert!(page.document().has_class(control.pre, "copy-code-highlight"));
    page.advance(ms(1));
    assert!(!page.document().has_class(control.pre, "copy-code-highlight"));

    page.run_until_idle();
    assert_eq!(page.now(), ms(timeout.max(400)));
    assert_eq!(page.control_state(control.button), Some(CopyState::Idle));
    teardown.run(&mut page);
}

#[test]
fn highlight_lasts_400ms_with_short_timeout() {
    highlight_window(100);
}

#[test]
fn highlight_lasts_400ms_with_long_timeout() {
    highlight_window(5000);
}

#[test]
fn no_highlight_by_default_or_on_failure() {
    let (mut page, _) = memory_page(vec![code_block("x")]);
    let teardown = attach(&mut page, None, &Options::default());
    let control = teardown.controls()[0].clone();
    page.click(control.button);
    assert!(!page.document().has_class(control.pre, "copy-code-highlight"));
    teardown.run(&mut page);

    let mut page = page_with(vec![code_block("x")], FailingClipboard::new("denied"));
    let teardown = attach(&mut page, None, &Options::new().with_highlight_on_copy(true));
    let control = teardown.controls()[0].clone();
    page.click(control.button);
    assert!(!page.document().has_class(control.pre, "copy-code-highlight"));
    teardown.run(&mut page);
}

#[test]
fn blocks_are_independent() {
    let (mut page, clipboard) = memory_page(vec![code_block("alpha"), code_block("beta")]);
    let teardown = attach(&mut page, None, &Options::default());
    let a = teardown.controls()[0].button;
    let b = teardown.controls()[1].button;

    page.click(a);
    assert_eq!(clipboard.writes(), ["alpha"]);
    assert_eq!(page.document().text_content(a), "Copied");
    assert_eq!(page.control_state(b), Some(CopyState::Idle));

    page.advance(ms(2000));
    assert_eq!(page.control_state(a), Some(CopyState::Idle));
    assert_eq!(page.control_state(b), Some(CopyState::Idle));
    assert!(shows_copy_icon(&page, a));
    assert!(shows_copy_icon(&page, b));
    teardown.run(&mut page);
}

#[test]
fn activation_does_not_reach_ancestor_listeners() {
    let (mut page, _) = memory_page(vec![code_block("x")]);
    let body = body(&page);
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    page.add_listener(body, move |_| counter.set(counter.get() + 1))
        .unwrap();

    let teardown = attach(&mut page, None, &Options::default());
    let control = teardown.controls()[0].clone();
    let event = page.click(control.button);
    assert!(event.propagation_stopped());
    assert_eq!(hits.get(), 0);

    // clicks elsewhere still bubble
    page.click(control.block);
    assert_eq!(hits.get(), 1);
    teardown.run(&mut page);
}

#[test]
fn click_on_icon_activates_its_button() {
    let (mut page, clipboard) = memory_page(vec![code_block("via icon")]);
    let teardown = attach(&mut page, None, &Options::default());
    let button = teardown.controls()[0].button;
    let icon = page.document().children(button)[0];
    page.click(icon);
    assert_eq!(clipboard.last().as_deref(), Some("via icon"));
    assert_eq!(page.control_state(button), Some(CopyState::Copied));
    teardown.run(&mut page);
}

#[test]
fn text_is_read_at_activation_time() {
    let (mut page, clipboard) = memory_page(vec![code_block("old")]);
    let teardown = attach(&mut page, None, &Options::default());
    let control = teardown.controls()[0].clone();
    let text_node = page.document().children(control.block)[0];
    page.document_mut().set_text(text_node, "new").unwrap();
    page.click(control.button);
    assert_eq!(clipboard.last().as_deref(), Some("new"));
    teardown.run(&mut page);
}

#[test]
fn line_numbers_can_be_left_out() {
    let block = || {
        elem(
            "pre",
            vec![],
            vec![elem(
                "code",
                vec![],
                vec![
                    elem("span", vec![("class", "line-number")], vec![text("1")]),
                    text("let a = 1;\n"),
                    elem("span", vec![("class", "line-number")], vec![text("2")]),
                    text("let b = 2;"),
                ],
            )],
        )
    };
    let (mut page, clipboard) = memory_page(vec![block()]);
    let teardown = attach(&mut page, None, &Options::new().with_include_line_numbers(false));
    page.click(teardown.controls()[0].button);
    assert_eq!(clipboard.last().as_deref(), Some("let a = 1;\nlet b = 2;"));
    teardown.run(&mut page);

    let (mut page, clipboard) = memory_page(vec![block()]);
    let teardown = attach(&mut page, None, &Options::default());
    page.click(teardown.controls()[0].button);
    assert_eq!(clipboard.last().as_deref(), Some("1let a = 1;\n2let b = 2;"));
    teardown.run(&mut page);
}

#[test]
fn repeated_activation_restarts_revert_timer() {
    let (mut page, clipboard) = memory_page(vec![code_block("x")]);
    let teardown = attach(&mut page, None, &Options::default());
    let button = teardown.controls()[0].button;

    page.click(button);
    page.advance(ms(1500));
    page.click(button);
    assert_eq!(clipboard.writes().len(), 2);
    assert_eq!(page.pending_timers(), 1);

    page.advance(ms(600));
    assert_eq!(page.control_state(button), Some(CopyState::Copied));
    page.advance(ms(1400));
    assert_eq!(page.now(), ms(3500));
    assert_eq!(page.control_state(button), Some(CopyState::Idle));
    // exactly one success content was ever shown at a time
    assert!(success_content(&page, button).is_none());
    teardown.run(&mut page);
}

#[test]
fn repeated_highlight_extends_marker() {
    let (mut page, _) = memory_page(vec![code_block("x")]);
    let teardown = attach(&mut page, None, &Options::new().with_highlight_on_copy(true));
    let control = teardown.controls()[0].clone();
    page.click(control.button);
    page.advance(ms(300));
    page.click(control.button);
    page.advance(ms(300));
    assert!(page.document().has_class(control.pre, "copy-code-highlight"));
    page.advance(ms(100));
    assert!(!page.document().has_class(control.pre, "copy-code-highlight"));
    teardown.run(&mut page);
}

#[test]
fn highlights_of_different_prefixes_expire_separately() {
    let (mut page, _) = memory_page(vec![code_block("x")]);
    let a = attach(&mut page, None, &Options::new().with_highlight_on_copy(true));
    let b = attach(
        &mut page,
        None,
        &Options::new()
            .with_class_prefix("other")
            .with_highlight_on_copy(true),
    );
    let pre = a.controls()[0].pre;
    assert_eq!(b.controls()[0].pre, pre);

    page.click(a.controls()[0].button);
    page.advance(ms(100));
    page.click(b.controls()[0].button);
    assert!(page.document().has_class(pre, "copy-code-highlight"));
    assert!(page.document().has_class(pre, "other-highlight"));

    page.advance(ms(300));
    assert!(!page.document().has_class(pre, "copy-code-highlight"));
    assert!(page.document().has_class(pre, "other-highlight"));
    page.advance(ms(100));
    assert!(!page.document().has_class(pre, "other-highlight"));

    page.run_until_idle();
    assert_eq!(page.document().attribute(pre, "class"), None);
    b.run(&mut page);
    a.run(&mut page);
}

#[test]
fn late_timers_after_teardown_are_noops() {
    let (mut page, _) = memory_page(vec![code_block("x")]);
    let options = Options::new().with_highlight_on_copy(true);
    let teardown = attach(&mut page, None, &options);
    let control = teardown.controls()[0].clone();
    let body = body(&page);

    page.click(control.button);
    teardown.run(&mut page);
    assert!(page.pending_timers() > 0);
    assert_eq!(page.control_state(control.button), None);
    assert!(!page.document().is_live(control.button));

    page.run_until_idle();
    assert_eq!(page.pending_timers(), 0);
    assert!(!page.document().has_class(control.pre, "copy-code-highlight"));
    assert!(with_class(page.document(), "copy-code-button-element").is_empty());
    assert!(page.document().is_live(body));
}

#[test]
fn late_timers_after_node_removal_are_noops() {
    let (mut page, _) = memory_page(vec![code_block("x")]);
    let teardown = attach(&mut page, None, &Options::new().with_highlight_on_copy(true));
    let control = teardown.controls()[0].clone();
    page.click(control.button);
    page.document_mut().remove(control.pre).unwrap();
    page.run_until_idle();
    assert_eq!(page.pending_timers(), 0);
    teardown.run(&mut page);
}
