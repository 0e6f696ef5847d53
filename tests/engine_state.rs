use modal_engine::{
    Command, Engine, Mode, Motion, Operator, Range, SearchDirection,
};

mod support;
use support::mock_buffer::MockBuffer;

#[test]
fn counts_accumulate_decimal_digits() {
    let mut eng = Engine::new();
    assert_eq!(eng.pending_count(), None);
    eng.push_count_digit(2);
    eng.push_count_digit(3);
    assert_eq!(eng.pending_count(), Some(23));
    assert_eq!(eng.take_count(), 23);
    // Taking resets to the default of 1.
    assert_eq!(eng.pending_count(), None);
    assert_eq!(eng.take_count(), 1);
}

#[test]
fn pending_operator_and_register_are_taken_once() {
    let mut eng = Engine::new();
    eng.set_pending_operator(Operator::Delete);
    eng.set_pending_register('a');
    assert_eq!(eng.take_pending_operator(), Some(Operator::Delete));
    assert_eq!(eng.take_pending_operator(), None);
    assert_eq!(eng.take_pending_register(), Some('a'));
    assert_eq!(eng.take_pending_register(), None);
}

#[test]
fn cancel_drops_all_pending_state() {
    let mut eng = Engine::new();
    eng.push_count_digit(5);
    eng.set_pending_operator(Operator::Yank);
    eng.set_pending_register('b');
    eng.cancel_pending();
    assert_eq!(eng.pending_count(), None);
    assert_eq!(eng.take_pending_operator(), None);
    assert_eq!(eng.take_pending_register(), None);
}

#[test]
fn snapshot_reflects_transient_state() {
    let mut eng = Engine::new();
    eng.set_mode(Mode::Visual);
    eng.push_count_digit(4);
    eng.set_pending_operator(Operator::Change);
    let snap = eng.snapshot();
    assert_eq!(snap.mode, Mode::Visual);
    assert_eq!(snap.pending_count, Some(4));
    assert_eq!(snap.pending_operator, Some(Operator::Change));
    assert_eq!(snap.pending_register, None);
}

#[test]
fn marks_are_named_offsets() {
    let mut eng = Engine::new();
    assert_eq!(eng.mark('m'), None);
    eng.set_mark('m', 42);
    assert_eq!(eng.mark('m'), Some(42));
    // Overwritten in place.
    eng.set_mark('m', 7);
    assert_eq!(eng.mark('m'), Some(7));
}

#[test]
fn jump_list_walks_back_and_forward() {
    let mut eng = Engine::new();
    eng.push_jump(0);
    eng.push_jump(10);
    // Going back saves the departure point.
    assert_eq!(eng.jump_back(20), Some(10));
    assert_eq!(eng.jump_back(10), Some(0));
    assert_eq!(eng.jump_back(0), None);
    assert_eq!(eng.jump_forward(), Some(10));
    assert_eq!(eng.jump_forward(), Some(20));
    assert_eq!(eng.jump_forward(), None);
}

#[test]
fn new_jump_truncates_forward_history() {
    let mut eng = Engine::new();
    eng.push_jump(0);
    eng.push_jump(10);
    assert_eq!(eng.jump_back(20), Some(10));
    eng.push_jump(30);
    assert_eq!(eng.jump_forward(), None);
    assert_eq!(eng.jump_back(40), Some(30));
}

#[test]
fn visual_range_is_normalized() {
    let mut eng = Engine::new();
    assert_eq!(eng.visual_range(3), None);
    eng.set_visual_anchor(5);
    assert_eq!(eng.visual_range(2), Some(Range::new(2, 5)));
    assert_eq!(eng.visual_range(9), Some(Range::new(5, 9)));
    eng.clear_visual_anchor();
    assert_eq!(eng.visual_range(2), None);
}

#[test]
fn last_search_is_recorded() {
    let mut eng = Engine::new();
    assert_eq!(eng.last_search(), None);
    eng.set_last_search("needle", SearchDirection::Forward);
    assert_eq!(
        eng.last_search(),
        Some(("needle", SearchDirection::Forward))
    );
    eng.set_last_search("prev", SearchDirection::Backward);
    assert_eq!(eng.last_search(), Some(("prev", SearchDirection::Backward)));
}

#[test]
fn registers_can_be_seeded_by_the_host() {
    let mut eng = Engine::new();
    eng.registers_mut().write('p', b"pasteme".to_vec());
    assert_eq!(eng.registers().read('p'), Some(b"pasteme".as_slice()));
}

#[test]
fn find_state_survives_unrelated_commands() {
    let mut buf = MockBuffer::new("abcabc\nabc");
    let mut eng = Engine::new();
    let cur = eng
        .execute_command(&mut buf, 0, &Command::bare(Motion::FindChar).char_arg('b'))
        .unwrap();
    assert_eq!(cur, 1);
    // A motion without a char argument leaves the recorded find alone.
    let cur = eng
        .execute_command(&mut buf, cur, &Command::bare(Motion::WordForward))
        .unwrap();
    assert_eq!(cur, 7);
    // Cursor is now on the second line; repeat searches there.
    let cur = eng
        .execute_command(&mut buf, cur, &Command::bare(Motion::RepeatFind))
        .unwrap();
    assert_eq!(cur, 8);
}

#[test]
fn mode_transitions_are_explicit() {
    let mut eng = Engine::new();
    assert_eq!(eng.mode(), Mode::Normal);
    eng.set_mode(Mode::VisualLine);
    assert_eq!(eng.mode(), Mode::VisualLine);
    eng.set_mode(Mode::Normal);
    assert_eq!(eng.mode(), Mode::Normal);
}
