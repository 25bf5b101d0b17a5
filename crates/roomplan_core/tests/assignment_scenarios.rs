use roomplan_core::{
    AdvisoryDecision, AdvisoryReason, Gender, HardRejection, JsonRosterSource, PersonId,
    PlannerSession, RoomId, RoomSettings, RoomType, SessionError,
};
use serde_json::json;

fn session_with_roster() -> PlannerSession {
    let rows = json!([
        {"사번": "P1", "성명": "김교수", "부서": "내과", "직계": "전임", "직위": "교수", "성별": "남자", "호봉": "30"},
        {"사번": "P2", "성명": "이부교수", "부서": "외과", "직계": "전임", "직위": "부교수", "성별": "여자", "호봉": "20"},
        {"사번": "P3", "성명": "박임상", "부서": "소아과", "직계": "임상", "직위": "임상교수", "성별": "남자", "호봉": "15"},
        {"사번": "P4", "성명": "최교수", "부서": "내과", "직계": "전임", "직위": "교수", "성별": "여자", "호봉": "28"}
    ]);
    let mut session = PlannerSession::new();
    session
        .load_roster(&JsonRosterSource::from_text(rows.to_string()))
        .expect("roster should load");
    session
}

fn pid(value: &str) -> PersonId {
    PersonId::new(value)
}

fn rid(value: &str) -> RoomId {
    RoomId::new(value)
}

#[test]
fn single_room_accepts_tenured_professor_then_rejects_second_person() {
    let mut session = session_with_roster();
    let r1 = rid("R1");
    session
        .configure_room(&r1, RoomSettings::new(Some(RoomType::Single), 1, None))
        .expect("configure");

    let invalidation = session
        .assign(&pid("P1"), &r1, None)
        .expect("tenured professor needs no confirmation");
    assert_eq!(invalidation.rooms, vec![r1.clone()]);
    assert!(invalidation.unassigned_list);

    let err = session
        .assign(&pid("P4"), &r1, None)
        .expect_err("second person must be rejected");
    assert!(matches!(
        err,
        SessionError::Rejected(HardRejection::CapacityExceeded { capacity: 1, .. })
    ));
    assert_eq!(session.room_snapshot(&r1).occupants.len(), 1);
    assert!(session.pending().is_none());
}

#[test]
fn gender_restricted_room_rejects_mismatch_without_state_change() {
    let mut session = session_with_roster();
    let r2 = rid("R2");
    session
        .configure_room(&r2, RoomSettings::new(None, 2, Some(Gender::Female)))
        .expect("configure");

    let err = session
        .assign(&pid("P1"), &r2, None)
        .expect_err("male person must be rejected");
    assert!(matches!(
        err,
        SessionError::Rejected(HardRejection::GenderMismatch {
            required: Gender::Female,
            ..
        })
    ));
    assert!(session.room_snapshot(&r2).occupants.is_empty());
    assert!(session.assignment_of(&pid("P1")).is_none());
}

#[test]
fn moving_between_rooms_updates_both_rooms_and_index() {
    let mut session = session_with_roster();
    let a = rid("A");
    let b = rid("B");
    session
        .configure_room(&a, RoomSettings::new(None, 2, None))
        .expect("configure a");
    session
        .configure_room(&b, RoomSettings::new(None, 2, None))
        .expect("configure b");
    session.assign(&pid("P3"), &a, None).expect("assign to A");
    session.assign(&pid("P1"), &a, None).expect("assign to A");

    let invalidation = session
        .assign(&pid("P3"), &b, Some(&a))
        .expect("move to B");

    assert_eq!(invalidation.rooms, vec![a.clone(), b.clone()]);
    assert_eq!(session.room_snapshot(&a).occupants.len(), 1);
    assert_eq!(session.room_snapshot(&b).occupants.len(), 1);
    assert_eq!(session.assignment_of(&pid("P3")), Some(&b));
}

#[test]
fn move_out_of_full_room_into_free_room_frees_capacity() {
    let mut session = session_with_roster();
    let a = rid("A");
    let b = rid("B");
    session.assign(&pid("P1"), &a, None).expect("assign");
    session.assign(&pid("P1"), &b, Some(&a)).expect("move");

    session
        .assign(&pid("P4"), &a, None)
        .expect("A has a free slot again");
    assert_eq!(session.assignment_of(&pid("P4")), Some(&a));
}

#[test]
fn unassign_is_idempotent() {
    let mut session = session_with_roster();
    let room = rid("R");
    session.assign(&pid("P2"), &room, None).expect("assign");

    let first = session.unassign(&pid("P2")).expect("unassign");
    assert_eq!(first.rooms, vec![room.clone()]);
    let second = session.unassign(&pid("P2")).expect("second unassign");
    assert!(second.is_empty());
    assert!(session.assignments().is_empty());
    assert!(session.room_snapshot(&room).occupants.is_empty());
}

#[test]
fn advisory_requires_confirmation_and_blocks_other_mutations() {
    let mut session = session_with_roster();
    let single = rid("S1");
    session
        .configure_room(&single, RoomSettings::new(Some(RoomType::Single), 1, None))
        .expect("configure");

    let err = session
        .assign(&pid("P3"), &single, None)
        .expect_err("clinical staff need confirmation for single rooms");
    assert!(matches!(
        err,
        SessionError::ConfirmationRequired(AdvisoryReason::SingleRoomRecommendation)
    ));
    assert!(session.assignment_of(&pid("P3")).is_none());

    let blocked = session
        .assign(&pid("P1"), &rid("other"), None)
        .expect_err("pending advisory blocks transitions");
    assert!(matches!(blocked, SessionError::TransitionPending));
    assert!(matches!(
        session.clear_room(&single),
        Err(SessionError::TransitionPending)
    ));

    session
        .resolve_pending(AdvisoryDecision::Confirm)
        .expect("confirmed assignment");
    assert_eq!(session.assignment_of(&pid("P3")), Some(&single));
    assert!(session.pending().is_none());
}

#[test]
fn declining_advisory_aborts_cleanly() {
    let mut session = session_with_roster();
    let double = rid("D1");
    session
        .configure_room(&double, RoomSettings::new(Some(RoomType::Double), 2, None))
        .expect("configure");

    let err = session
        .assign(&pid("P1"), &double, None)
        .expect_err("professors get a double-room advisory");
    assert!(matches!(
        err,
        SessionError::ConfirmationRequired(AdvisoryReason::DoubleRoomRecommendation)
    ));

    let declined = session
        .resolve_pending(AdvisoryDecision::Decline)
        .expect_err("decline aborts");
    assert!(matches!(declined, SessionError::UserAborted));
    assert!(session.room_snapshot(&double).occupants.is_empty());
    assert!(matches!(
        session.resolve_pending(AdvisoryDecision::Confirm),
        Err(SessionError::NoPendingConfirmation)
    ));

    session
        .assign(&pid("P2"), &double, None)
        .expect("tenured associate professor fits a double room");
}

#[test]
fn capacity_reduction_keeps_occupants_and_rejects_additions() {
    let mut session = session_with_roster();
    let room = rid("R");
    session
        .configure_room(&room, RoomSettings::new(None, 3, None))
        .expect("configure");
    session.assign(&pid("P1"), &room, None).expect("P1");
    session.assign(&pid("P2"), &room, None).expect("P2");

    session
        .configure_room(&room, RoomSettings::from_panel("", "1", ""))
        .expect("shrink");
    let snapshot = session.room_snapshot(&room);
    assert_eq!(snapshot.config.capacity, 1);
    assert_eq!(snapshot.occupants.len(), 2);

    assert!(matches!(
        session.assign(&pid("P3"), &room, None),
        Err(SessionError::Rejected(HardRejection::CapacityExceeded { .. }))
    ));
}

#[test]
fn clear_room_returns_occupants_to_unassigned_list() {
    let mut session = session_with_roster();
    let room = rid("R");
    session
        .configure_room(&room, RoomSettings::new(None, 2, None))
        .expect("configure");
    session.assign(&pid("P1"), &room, None).expect("P1");
    session.assign(&pid("P2"), &room, None).expect("P2");
    assert_eq!(session.list_unassigned("").len(), 2);

    let invalidation = session.clear_room(&room).expect("clear");
    assert!(invalidation.unassigned_list);
    assert_eq!(session.list_unassigned("").len(), 4);
    assert_eq!(session.room_snapshot(&room).config.capacity, 2);
}

#[test]
fn reset_all_drops_configuration_and_assignments() {
    let mut session = session_with_roster();
    let room = rid("R");
    session
        .configure_room(&room, RoomSettings::new(Some(RoomType::Multi), 4, None))
        .expect("configure");
    session.assign(&pid("P1"), &room, None).expect("assign");

    let invalidation = session.reset_all().expect("reset");
    assert_eq!(invalidation.rooms, vec![room.clone()]);
    assert!(session.rooms().is_empty());
    assert!(session.assignments().is_empty());
    assert_eq!(session.room_snapshot(&room).config.capacity, 1);
    assert_eq!(session.people().len(), 4);
}

#[test]
fn unknown_person_is_reported() {
    let mut session = session_with_roster();
    let err = session
        .assign(&pid("nobody"), &rid("R"), None)
        .expect_err("unknown person");
    assert!(matches!(err, SessionError::UnknownPerson(_)));
    assert_eq!(err.to_string(), "person not found: nobody");
}

#[test]
fn inspecting_a_room_creates_it_with_defaults() {
    let mut session = session_with_roster();
    let room = rid("R9");
    assert!(session.rooms().get(&room).is_none());

    let snapshot = session.inspect_room(&room);
    assert_eq!(snapshot.config.capacity, 1);
    assert!(snapshot.config.gender.is_none());
    assert!(snapshot.config.room_type.is_none());
    assert!(session.rooms().get(&room).is_some());
}
