use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use opcast::{
    BuildOperationListener, EventKind, ListenerError, ListenerHandle, ListenerManager,
    ListenerRegistry, OperationDescriptor, OperationFinishEvent, OperationIdentifier,
    OperationProgressEvent, OperationStartEvent,
};

use crate::integration::test_utils::{descriptor, finish_event, start_event, CallLog, Recorder};

/// Runs `on_finish` from inside its own `finished` callback.
struct Hook<F> {
    label: &'static str,
    log: CallLog,
    on_finish: F,
}

impl<F> BuildOperationListener for Hook<F>
where
    F: Fn() + Send + Sync,
{
    fn started(&self, _: &OperationDescriptor, _: &OperationStartEvent) -> Result<(), ListenerError> {
        Ok(())
    }

    fn progress(&self, _: OperationIdentifier, _: &OperationProgressEvent) -> Result<(), ListenerError> {
        Ok(())
    }

    fn finished(&self, d: &OperationDescriptor, _: &OperationFinishEvent) -> Result<(), ListenerError> {
        self.log.push(crate::integration::test_utils::Call {
            listener: self.label,
            kind: EventKind::Finished,
            operation: d.id,
        });
        (self.on_finish)();
        Ok(())
    }

    fn name(&self) -> &str {
        self.label
    }
}

#[test]
fn in_flight_finish_ignores_listener_added_mid_iteration() {
    let log = CallLog::new();
    let manager = ListenerManager::new();
    let (reached_tx, reached_rx) = mpsc::channel::<()>();
    let (added_tx, added_rx) = mpsc::channel::<()>();
    let added_rx = parking_lot::Mutex::new(added_rx);

    manager.add_listener(Recorder::new("l1", &log));
    manager.add_listener(Arc::new(Hook {
        label: "l2",
        log: log.clone(),
        on_finish: move || {
            reached_tx.send(()).unwrap();
            added_rx.lock().recv().unwrap();
        },
    }));

    let registrar = {
        let manager = manager.clone();
        let log = log.clone();
        thread::spawn(move || {
            reached_rx.recv().unwrap();
            manager.add_listener(Recorder::new("l3", &log));
            added_tx.send(()).unwrap();
        })
    };

    let op = descriptor(1);
    manager.broadcaster().finished(&op, &finish_event()).unwrap();
    registrar.join().unwrap();

    assert_eq!(log.order_of(EventKind::Finished), vec!["l2", "l1"]);
    assert_eq!(manager.registry().len(), 3);
}

#[test]
fn listener_may_register_from_inside_a_callback() {
    let log = CallLog::new();
    let registry = Arc::new(ListenerRegistry::new());
    let late = ListenerHandle::from(Recorder::new("late", &log));

    let hook = {
        let registry = registry.clone();
        let late = late.clone();
        Hook {
            label: "hook",
            log: log.clone(),
            on_finish: move || registry.add_listener(&late),
        }
    };
    registry.add_listener(Arc::new(hook));

    let manager_broadcaster = opcast::Broadcaster::new(registry.clone());
    manager_broadcaster.finished(&descriptor(1), &finish_event()).unwrap();
    assert_eq!(log.order_of(EventKind::Finished), vec!["hook"]);

    log.take();
    manager_broadcaster.finished(&descriptor(2), &finish_event()).unwrap();
    assert_eq!(log.order_of(EventKind::Finished), vec!["late", "hook"]);
}

thread_local! {
    static SEEN: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Records its index into a per-thread buffer so each broadcasting thread can
/// inspect exactly what its own delivery saw.
struct Indexed(usize);

impl BuildOperationListener for Indexed {
    fn started(&self, _: &OperationDescriptor, _: &OperationStartEvent) -> Result<(), ListenerError> {
        SEEN.with(|seen| seen.borrow_mut().push(self.0));
        Ok(())
    }

    fn progress(&self, _: OperationIdentifier, _: &OperationProgressEvent) -> Result<(), ListenerError> {
        Ok(())
    }

    fn finished(&self, _: &OperationDescriptor, _: &OperationFinishEvent) -> Result<(), ListenerError> {
        SEEN.with(|seen| seen.borrow_mut().push(self.0));
        Ok(())
    }
}

#[test]
fn concurrent_broadcasts_only_observe_committed_prefixes() {
    const LISTENERS: usize = 64;

    let manager = ListenerManager::new();
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let manager = manager.clone();
            let done = done.clone();
            thread::spawn(move || {
                let op = descriptor(1);
                let mut broadcasts = 0usize;
                while !done.load(Ordering::Acquire) || broadcasts == 0 {
                    manager.broadcaster().started(&op, &start_event()).unwrap();
                    let forward = SEEN.with(|seen| std::mem::take(&mut *seen.borrow_mut()));
                    assert_eq!(forward, (0..forward.len()).collect::<Vec<_>>());

                    manager.broadcaster().finished(&op, &finish_event()).unwrap();
                    let backward = SEEN.with(|seen| std::mem::take(&mut *seen.borrow_mut()));
                    assert_eq!(backward, (0..backward.len()).rev().collect::<Vec<_>>());

                    broadcasts += 1;
                }
                broadcasts
            })
        })
        .collect();

    for index in 0..LISTENERS {
        manager.add_listener(Arc::new(Indexed(index)));
        if index % 8 == 0 {
            thread::sleep(Duration::from_millis(1));
        }
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }
    assert_eq!(manager.registry().len(), LISTENERS);
}

#[test]
fn churn_never_exposes_partial_sequences() {
    let manager = ListenerManager::new();
    let stable = ListenerHandle::from(Arc::new(Indexed(0)));
    manager.add_listener(&stable);
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let manager = manager.clone();
        let done = done.clone();
        thread::spawn(move || {
            let transient = ListenerHandle::from(Arc::new(Indexed(1)));
            for _ in 0..2_000 {
                manager.add_listener(&transient);
                manager.remove_listener(&transient);
            }
            done.store(true, Ordering::Release);
        })
    };

    while !done.load(Ordering::Acquire) {
        let snapshot = manager.registry().snapshot();
        assert!(snapshot.len() == 1 || snapshot.len() == 2);
        assert_eq!(snapshot.get(0), Some(&stable));
    }
    writer.join().unwrap();
    assert_eq!(manager.registry().len(), 1);
}
