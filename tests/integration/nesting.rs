use std::sync::Arc;

use opcast::listeners::{NestingTracker, TracingListener};
use opcast::{
    BuildOperationListener, ListenerError, ListenerManager, OperationDescriptor,
    OperationFinishEvent, OperationIdentifier, OperationProgressEvent, OperationStartEvent,
};
use parking_lot::Mutex;

use crate::integration::test_utils::{descriptor, finish_event, start_event};

/// Reads depth from the tracker on both start and finish; relies on being
/// registered after it.
struct DepthReader {
    tracker: Arc<NestingTracker>,
    seen: Mutex<Vec<(&'static str, u64, Option<usize>)>>,
}

impl BuildOperationListener for DepthReader {
    fn started(&self, d: &OperationDescriptor, _: &OperationStartEvent) -> Result<(), ListenerError> {
        self.seen.lock().push(("start", d.id.get(), self.tracker.depth_of(d.id)));
        Ok(())
    }

    fn progress(&self, _: OperationIdentifier, _: &OperationProgressEvent) -> Result<(), ListenerError> {
        Ok(())
    }

    fn finished(&self, d: &OperationDescriptor, _: &OperationFinishEvent) -> Result<(), ListenerError> {
        self.seen.lock().push(("finish", d.id.get(), self.tracker.depth_of(d.id)));
        Ok(())
    }
}

#[test]
fn later_listener_sees_tracker_state_on_start_and_finish() {
    let manager = ListenerManager::new();
    let tracker = Arc::new(NestingTracker::new());
    let reader = Arc::new(DepthReader {
        tracker: tracker.clone(),
        seen: Mutex::new(Vec::new()),
    });
    manager.add_listener(tracker.clone());
    manager.add_listener(Arc::new(TracingListener::new()));
    manager.add_listener(reader.clone());

    let broadcaster = manager.broadcaster();
    let build = descriptor(1);
    let task = descriptor(2).with_parent(1_u64);
    broadcaster.started(&build, &start_event()).unwrap();
    broadcaster.started(&task, &start_event()).unwrap();
    broadcaster.finished(&task, &finish_event()).unwrap();
    broadcaster.finished(&build, &finish_event()).unwrap();

    assert_eq!(
        *reader.seen.lock(),
        vec![
            ("start", 1, Some(0)),
            ("start", 2, Some(1)),
            ("finish", 2, Some(1)),
            ("finish", 1, Some(0)),
        ]
    );
    assert!(tracker.running().is_empty());
}

#[test]
fn finishing_twice_surfaces_unknown_operation() {
    let manager = ListenerManager::new();
    manager.add_listener(Arc::new(NestingTracker::new()));

    let op = descriptor(9);
    manager.broadcaster().started(&op, &start_event()).unwrap();
    manager.broadcaster().finished(&op, &finish_event()).unwrap();
    let err = manager
        .broadcaster()
        .finished(&op, &finish_event())
        .unwrap_err();

    assert!(matches!(err.root_cause(), ListenerError::UnknownOperation(id) if *id == op.id));
}
