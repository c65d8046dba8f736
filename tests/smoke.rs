use byldr_input::{InputEvent, InputQueue};
use byldr_testkit::{EventRecord, JsonlSink};
use byldr_world::Session;

#[test]
fn deterministic_event_stream_can_be_written() {
    let path = std::env::temp_dir().join("byldr-smoke").join("eventlog.jsonl");
    let mut sink = JsonlSink::create(&path).expect("can create temp log");

    let mut session = Session::default();
    let mut input = InputQueue::new();
    input.push(InputEvent::Look {
        yaw: 0.0,
        pitch: -0.6,
    });
    input.push(InputEvent::Action);
    let report = session.tick(1.0 / 60.0, &input.drain_frame());
    assert_eq!(report.events.len(), 1);

    for event in &report.events {
        sink.write(&EventRecord {
            tick: report.tick,
            kind: event.kind(),
            payload: event,
        })
        .expect("can write event");
    }
    sink.flush().expect("can flush");

    let written = std::fs::read_to_string(&path).expect("log readable");
    assert_eq!(written.lines().count(), 1);
    assert!(written.contains("\"kind\":\"placed\""));
}
