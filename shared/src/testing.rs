//! In-memory visual tree and manually driven scheduler for controller tests.
//!
//! `MemoryTree` records every mutation in a journal so tests can assert on the
//! order in which flags, heights and attachments change. `ManualScheduler`
//! only runs continuations when the test advances its clock.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

use crate::timer::{Continuation, Scheduler};
use crate::tree::{Activation, ActivationHandler, VisualTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One recorded mutation of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    FlagAdded(NodeId, String),
    FlagRemoved(NodeId, String),
    Appended { parent: NodeId, child: NodeId },
    Removed { parent: NodeId, child: NodeId },
    HeightSet(NodeId, Option<f64>),
    /// Free-form marker pushed by a test, e.g. from a listener.
    Mark(String),
}

#[derive(Default)]
struct NodeData {
    selectors: Vec<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    flags: BTreeSet<String>,
    height: f64,
    explicit_height: Option<f64>,
    handlers: Vec<Rc<dyn Fn(&MemoryEvent)>>,
}

pub struct MemoryEvent {
    target: NodeId,
    default_prevented: Cell<bool>,
}

impl MemoryEvent {
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl Activation for MemoryEvent {
    type Node = NodeId;

    fn target(&self) -> Option<NodeId> {
        Some(self.target)
    }

    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }
}

#[derive(Default)]
pub struct MemoryTree {
    nodes: RefCell<Vec<NodeData>>,
    background: RefCell<Vec<Rc<dyn Fn(&MemoryEvent)>>>,
    journal: RefCell<Vec<Mutation>>,
}

impl MemoryTree {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Create a detached node matched by `selector`.
    pub fn create(&self, selector: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData {
            selectors: vec![selector.to_string()],
            ..NodeData::default()
        });
        NodeId(nodes.len() - 1)
    }

    /// Create a node matched by `selector` as the last child of `parent`.
    pub fn create_child(&self, parent: NodeId, selector: &str) -> NodeId {
        let child = self.create(selector);
        let mut nodes = self.nodes.borrow_mut();
        nodes[child.0].parent = Some(parent);
        nodes[parent.0].children.push(child);
        child
    }

    pub fn set_rendered_height(&self, node: NodeId, height: f64) {
        self.nodes.borrow_mut()[node.0].height = height;
    }

    pub fn explicit_height(&self, node: NodeId) -> Option<f64> {
        self.nodes.borrow()[node.0].explicit_height
    }

    pub fn is_attached(&self, parent: NodeId, child: NodeId) -> bool {
        self.nodes.borrow()[parent.0].children.contains(&child)
    }

    pub fn mark(&self, label: &str) {
        self.journal.borrow_mut().push(Mutation::Mark(label.to_string()));
    }

    pub fn journal(&self) -> Vec<Mutation> {
        self.journal.borrow().clone()
    }

    pub fn clear_journal(&self) {
        self.journal.borrow_mut().clear();
    }

    pub fn handler_count(&self, node: NodeId) -> usize {
        self.nodes.borrow()[node.0].handlers.len()
    }

    pub fn background_handler_count(&self) -> usize {
        self.background.borrow().len()
    }

    /// Deliver an activation to `node`, then to every background handler.
    pub fn click(&self, node: NodeId) -> MemoryEvent {
        let event = MemoryEvent {
            target: node,
            default_prevented: Cell::new(false),
        };
        // Handlers mutate the tree, so run them from a snapshot.
        let local: Vec<_> = self.nodes.borrow()[node.0].handlers.clone();
        for handler in local {
            handler(&event);
        }
        let background: Vec<_> = self.background.borrow().clone();
        for handler in background {
            handler(&event);
        }
        event
    }

    fn record(&self, mutation: Mutation) {
        self.journal.borrow_mut().push(mutation);
    }
}

impl VisualTree for MemoryTree {
    type Node = NodeId;
    type Event = MemoryEvent;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, data)| data.selectors.iter().any(|s| s == selector))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    fn add_flag(&self, node: &NodeId, flag: &str) {
        self.nodes.borrow_mut()[node.0].flags.insert(flag.to_string());
        self.record(Mutation::FlagAdded(*node, flag.to_string()));
    }

    fn remove_flag(&self, node: &NodeId, flag: &str) {
        self.nodes.borrow_mut()[node.0].flags.remove(flag);
        self.record(Mutation::FlagRemoved(*node, flag.to_string()));
    }

    fn has_flag(&self, node: &NodeId, flag: &str) -> bool {
        self.nodes.borrow()[node.0].flags.contains(flag)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        {
            let mut nodes = self.nodes.borrow_mut();
            if let Some(previous) = nodes[child.0].parent.take() {
                nodes[previous.0].children.retain(|c| c != child);
            }
            nodes[child.0].parent = Some(*parent);
            nodes[parent.0].children.push(*child);
        }
        self.record(Mutation::Appended { parent: *parent, child: *child });
    }

    fn remove_child(&self, parent: &NodeId, child: &NodeId) {
        {
            let mut nodes = self.nodes.borrow_mut();
            nodes[parent.0].children.retain(|c| c != child);
            if nodes[child.0].parent == Some(*parent) {
                nodes[child.0].parent = None;
            }
        }
        self.record(Mutation::Removed { parent: *parent, child: *child });
    }

    fn rendered_height(&self, node: &NodeId) -> f64 {
        self.nodes.borrow()[node.0].height
    }

    fn set_height(&self, node: &NodeId, height: Option<f64>) {
        self.nodes.borrow_mut()[node.0].explicit_height = height;
        self.record(Mutation::HeightSet(*node, height));
    }

    fn on_activate(&self, node: &NodeId, handler: ActivationHandler<MemoryEvent>) {
        self.nodes.borrow_mut()[node.0].handlers.push(Rc::from(handler));
    }

    fn on_background_activate(&self, handler: ActivationHandler<MemoryEvent>) {
        self.background.borrow_mut().push(Rc::from(handler));
    }
}

struct Pending {
    due: Duration,
    seq: u64,
    continuation: Continuation,
}

/// Scheduler whose clock only moves when the test says so.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    seq: Cell<u64>,
    queue: RefCell<Vec<Pending>>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move the clock forward by `by`, running every continuation that falls due,
    /// including ones scheduled along the way.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        while let Some(pending) = self.pop_due(target) {
            self.now.set(pending.due);
            (pending.continuation)();
        }
        self.now.set(target);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Run until nothing is queued.
    pub fn run_until_idle(&self) {
        while let Some(due) = self.next_due() {
            let by = due.saturating_sub(self.now.get());
            self.advance(by);
        }
    }

    fn next_due(&self) -> Option<Duration> {
        self.queue.borrow().iter().map(|p| p.due).min()
    }

    fn pop_due(&self, target: Duration) -> Option<Pending> {
        let mut queue = self.queue.borrow_mut();
        let index = queue
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(index, _)| index)?;
        Some(queue.swap_remove(index))
    }
}

impl Scheduler for ManualScheduler {
    fn delay(&self, duration: Duration, continuation: Continuation) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.queue.borrow_mut().push(Pending {
            due: self.now.get() + duration,
            seq,
            continuation,
        });
    }
}
