use super::*;

#[test]
fn new_slot_has_nothing_pending() {
    let slot = FrameSlot::new(Lane::Momentum);
    assert!(!slot.is_pending());
}

#[test]
fn schedule_issues_token_for_lane() {
    let mut slot = FrameSlot::new(Lane::Tween);
    let token = slot.schedule();
    assert_eq!(token.lane, Lane::Tween);
    assert!(slot.is_pending());
}

#[test]
fn tokens_are_distinct() {
    let mut slot = FrameSlot::new(Lane::Momentum);
    let a = slot.schedule();
    let b = slot.schedule();
    assert_ne!(a, b);
}

#[test]
fn fire_consumes_current_token() {
    let mut slot = FrameSlot::new(Lane::Momentum);
    let token = slot.schedule();
    assert!(slot.fire(token));
    assert!(!slot.is_pending());
    assert!(!slot.fire(token));
}

#[test]
fn fire_rejects_invalidated_token() {
    let mut slot = FrameSlot::new(Lane::Momentum);
    let token = slot.schedule();
    assert_eq!(slot.invalidate(), Some(token));
    assert!(!slot.fire(token));
}

#[test]
fn fire_rejects_superseded_token() {
    let mut slot = FrameSlot::new(Lane::Momentum);
    let old = slot.schedule();
    slot.invalidate();
    let new = slot.schedule();
    assert!(!slot.fire(old));
    assert!(slot.fire(new));
}

#[test]
fn fire_rejects_other_lane() {
    let mut momentum = FrameSlot::new(Lane::Momentum);
    let mut tween = FrameSlot::new(Lane::Tween);
    let m = momentum.schedule();
    tween.schedule();
    assert!(!tween.fire(m));
}

#[test]
fn invalidate_when_idle_is_none() {
    let mut slot = FrameSlot::new(Lane::Tween);
    assert_eq!(slot.invalidate(), None);
}
