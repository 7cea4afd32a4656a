use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use glib::SourceId;

use flipmatch::{Scheduler, Task, TaskId};

type Dispatch = Rc<RefCell<Option<Box<dyn Fn(Task)>>>>;

/// Runs game tasks as one-shot timeouts on the GLib main loop.
#[derive(Default)]
pub struct GlibScheduler {
    next_id: u64,
    // Sources still waiting to fire. A fired source removes itself so it is
    // never passed to `SourceId::remove` afterwards.
    sources: Rc<RefCell<HashMap<TaskId, SourceId>>>,
    dispatch: Dispatch,
}

impl GlibScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect_dispatch(&self, dispatch: impl Fn(Task) + 'static) {
        *self.dispatch.borrow_mut() = Some(Box::new(dispatch));
    }
}

impl Scheduler for GlibScheduler {
    fn schedule(&mut self, delay: Duration, task: Task) -> TaskId {
        self.next_id += 1;
        let id = TaskId::new(self.next_id);
        let sources = self.sources.clone();
        let dispatch = self.dispatch.clone();
        let source = glib::timeout_add_local_once(delay, move || {
            sources.borrow_mut().remove(&id);
            if let Some(dispatch) = dispatch.borrow().as_ref() {
                dispatch(task);
            }
        });
        self.sources.borrow_mut().insert(id, source);
        id
    }

    fn cancel(&mut self, id: TaskId) {
        if let Some(source) = self.sources.borrow_mut().remove(&id) {
            source.remove();
        }
    }
}
