use super::*;
use derivative::Derivative;

type LeafFn<C> = Box<dyn FnMut(&mut C) -> Status + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
    Running,
}

/// A behavior tree node. Evaluation is a single pass, a Running node is evaluated from scratch on
/// the next tick like any other.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub enum Node<C = ()> {
    Leaf {
        name: String,
        #[derivative(Debug = "ignore")]
        f: LeafFn<C>,
    },
    /// Succeeds if every child succeeds, stops at the first that does not
    Sequence(Vec<Node<C>>),
    /// Fails if every child fails, stops at the first that does not
    Selector(Vec<Node<C>>),
}

impl<C> Node<C> {
    pub fn leaf<F>(name: &str, f: F) -> Self
    where
        F: FnMut(&mut C) -> Status + Send + 'static,
    {
        Node::Leaf {
            name: name.to_string(),
            f: Box::new(f),
        }
    }

    pub fn sequence(children: Vec<Node<C>>) -> Self {
        Node::Sequence(children)
    }

    pub fn selector(children: Vec<Node<C>>) -> Self {
        Node::Selector(children)
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Leaf { name, .. } => name,
            Node::Sequence(_) => "sequence",
            Node::Selector(_) => "selector",
        }
    }

    pub fn children(&self) -> &[Node<C>] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Sequence(children) | Node::Selector(children) => children,
        }
    }

    pub fn evaluate(&mut self, ctx: &mut C) -> Status {
        match self {
            Node::Leaf { name, f } => {
                let status = f(ctx);
                trace!("leaf {} -> {:?}", name, status);
                status
            }
            Node::Sequence(children) => Self::evaluate_until(children, ctx, Status::Success),
            Node::Selector(children) => Self::evaluate_until(children, ctx, Status::Failure),
        }
    }

    /// Evaluates children while they return keep_going, returns the first other status or
    /// keep_going if every child returned it
    fn evaluate_until(children: &mut [Node<C>], ctx: &mut C, keep_going: Status) -> Status {
        for child in children.iter_mut() {
            let status = child.evaluate(ctx);
            if status != keep_going {
                return status;
            }
        }
        keep_going
    }
}

/// Owns a root node. The driver calls tick() whenever it wants a decision.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct BehaviorTree<C = ()> {
    root: Node<C>,
}

impl<C> BehaviorTree<C> {
    pub fn new(root: Node<C>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node<C> {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node<C> {
        &mut self.root
    }

    pub fn tick(&mut self, ctx: &mut C) -> Status {
        let status = self.root.evaluate(ctx);
        trace!("{} tree ticked: {:?}", self.root.name(), status);
        status
    }
}
