use super::*;

const STREAM_ID: StreamId = StreamId(1);
const PRIORITY: StreamPriority = StreamPriority(128);

#[test]
fn test_stream_open() {
    let mut table = StreamTable::default();
    assert_eq!(table.state(STREAM_ID), StreamState::Closed);
    assert!(!table.is_open(STREAM_ID));

    assert_eq!(table.open(STREAM_ID, PRIORITY), OpenResult::Inserted);
    assert_eq!(table.state(STREAM_ID), StreamState::Open);
    assert_eq!(table.priority(STREAM_ID), Some(PRIORITY));

    assert_eq!(
        table.open(STREAM_ID, StreamPriority(512)),
        OpenResult::Updated
    );
    assert_eq!(table.priority(STREAM_ID), Some(StreamPriority(512)));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_stream_priorities_in_insertion_order() {
    let mut table = StreamTable::default();
    table.open(StreamId(7), StreamPriority(1));
    table.open(StreamId(2), StreamPriority(2));
    table.open(StreamId(5), StreamPriority(3));
    table.open(StreamId(2), StreamPriority(4));

    assert_eq!(
        table.priorities(),
        vec![
            (StreamId(7), StreamPriority(1)),
            (StreamId(2), StreamPriority(4)),
            (StreamId(5), StreamPriority(3)),
        ]
    );
}

#[test]
fn test_stream_local_close() {
    let mut table = StreamTable::default();
    table.open(STREAM_ID, PRIORITY);

    assert_eq!(
        table.reset_locally(STREAM_ID),
        LocalResetResult::ResetRequired
    );
    assert_eq!(table.state(STREAM_ID), StreamState::Closing);
    assert_eq!(table.reset_locally(STREAM_ID), LocalResetResult::InProgress);
    assert_eq!(table.open(STREAM_ID, PRIORITY), OpenResult::Rejected);

    assert_eq!(
        table.on_reset_performed(STREAM_ID),
        Some(ResetProgress::default())
    );
    assert_eq!(table.state(STREAM_ID), StreamState::Closing);

    assert_eq!(
        table.on_incoming_reset(STREAM_ID),
        Some(ResetProgress {
            reset_outgoing: false,
            closing: false,
            closed: true,
        })
    );
    assert_eq!(table.state(STREAM_ID), StreamState::Closed);
    assert!(table.is_empty());

    // a closed id may be opened again
    assert_eq!(table.open(STREAM_ID, PRIORITY), OpenResult::Inserted);
}

#[test]
fn test_stream_local_close_incoming_first() {
    let mut table = StreamTable::default();
    table.open(STREAM_ID, PRIORITY);
    table.reset_locally(STREAM_ID);

    assert_eq!(
        table.on_incoming_reset(STREAM_ID),
        Some(ResetProgress::default())
    );
    assert_eq!(
        table.on_reset_performed(STREAM_ID),
        Some(ResetProgress {
            reset_outgoing: false,
            closing: false,
            closed: true,
        })
    );
    assert!(table.is_empty());
}

#[test]
fn test_stream_remote_close() {
    let mut table = StreamTable::default();
    table.open(STREAM_ID, PRIORITY);

    assert_eq!(
        table.on_incoming_reset(STREAM_ID),
        Some(ResetProgress {
            reset_outgoing: true,
            closing: true,
            closed: false,
        })
    );
    assert_eq!(table.state(STREAM_ID), StreamState::Closing);

    // the stream is already being reset in both directions
    assert_eq!(table.reset_locally(STREAM_ID), LocalResetResult::InProgress);
    assert_eq!(table.on_incoming_reset(STREAM_ID), None);

    assert_eq!(
        table.on_reset_performed(STREAM_ID),
        Some(ResetProgress {
            reset_outgoing: false,
            closing: false,
            closed: true,
        })
    );
    assert_eq!(table.on_reset_performed(STREAM_ID), None);
    assert!(table.is_empty());
}

#[test]
fn test_stream_unknown() {
    let mut table = StreamTable::default();
    assert_eq!(table.reset_locally(STREAM_ID), LocalResetResult::Unknown);
    assert_eq!(table.on_incoming_reset(STREAM_ID), None);
    assert_eq!(table.on_reset_performed(STREAM_ID), None);
    assert_eq!(table.priority(STREAM_ID), None);
}

#[test]
fn test_stream_take_all() {
    let mut table = StreamTable::default();
    table.open(StreamId(3), PRIORITY);
    table.open(StreamId(1), PRIORITY);
    table.open(StreamId(2), PRIORITY);
    table.reset_locally(StreamId(2));

    assert_eq!(
        table.take_all(),
        vec![StreamId(1), StreamId(2), StreamId(3)]
    );
    assert!(table.is_empty());
}
