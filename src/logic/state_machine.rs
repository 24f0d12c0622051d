use super::*;
use std::fmt::Display;

type Hook<C> = Box<dyn FnMut(&mut C) + Send>;
type Guard<C> = Box<dyn Fn(&C) -> bool + Send>;

/// Payload of StateMachine::state_changed()
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// None only for the first transition
    pub from: Option<String>,
    pub to: String,
}

impl Display for StateChange {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.from.as_deref().unwrap_or("(none)"),
            self.to
        )
    }
}

/// The optional enter, update and exit hooks of one state
pub struct StateHooks<C> {
    on_enter: Option<Hook<C>>,
    on_update: Option<Hook<C>>,
    on_exit: Option<Hook<C>>,
}

impl<C> Default for StateHooks<C> {
    fn default() -> Self {
        Self {
            on_enter: None,
            on_update: None,
            on_exit: None,
        }
    }
}

impl<C> StateHooks<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter<F: FnMut(&mut C) + Send + 'static>(mut self, f: F) -> Self {
        self.on_enter = Some(Box::new(f));
        self
    }

    /// Runs on StateMachine::update() when no transition is taken
    pub fn on_update<F: FnMut(&mut C) + Send + 'static>(mut self, f: F) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    pub fn on_exit<F: FnMut(&mut C) + Send + 'static>(mut self, f: F) -> Self {
        self.on_exit = Some(Box::new(f));
        self
    }
}

struct Transition<C> {
    from: String,
    to: String,
    guard: Guard<C>,
}

/// Named states with hooks and guarded transitions. Hooks and guards get the context the driver
/// passes in. set_state() always transitions, update() only when a guard allows it.
pub struct StateMachine<C = ()> {
    states: HashMap<String, StateHooks<C>>,
    transitions: Vec<Transition<C>>,
    current: Option<String>,
    state_changed: Signal<StateChange>,
}

impl<C> Default for StateMachine<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> StateMachine<C> {
    pub fn new() -> Self {
        Self::with_reporter(default_reporter())
    }

    /// Listener failures on state_changed() go to the reporter
    pub fn with_reporter(reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            states: HashMap::new(),
            transitions: Vec::new(),
            current: None,
            state_changed: Signal::with_reporter(reporter),
        }
    }

    /// Adds a state, replacing the hooks if it already exists
    pub fn add_state(&mut self, name: &str, hooks: StateHooks<C>) -> &mut Self {
        if self.states.insert(name.to_string(), hooks).is_some() {
            debug!("state {:?} redefined", name);
        }
        self
    }

    /// Transitions are tried in the order they are added
    pub fn add_transition<F>(&mut self, from: &str, to: &str, guard: F) -> &mut Self
    where
        F: Fn(&C) -> bool + Send + 'static,
    {
        self.transitions.push(Transition {
            from: from.to_string(),
            to: to.to_string(),
            guard: Box::new(guard),
        });
        self
    }

    pub fn current_state(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Fired after every committed transition, once the new state's enter hook has run
    pub fn state_changed(&self) -> &Signal<StateChange> {
        &self.state_changed
    }

    /// Unconditionally transitions to the state, re-entering it if it is already current. The
    /// exit hook of the old state only runs if the state actually changes.
    pub fn set_state(&mut self, name: &str, ctx: &mut C) {
        if !self.has_state(name) {
            debug!("entering state {:?}, which has no hooks", name);
        }
        let from = self.current.take();
        if let Some(old) = from.as_deref() {
            if old != name {
                self.run_hook(old, ctx, |hooks| hooks.on_exit.as_mut());
            }
        }
        self.current = Some(name.to_string());
        self.run_hook(name, ctx, |hooks| hooks.on_enter.as_mut());
        let change = StateChange {
            from,
            to: name.to_string(),
        };
        debug!("state changed: {}", change);
        self.state_changed.fire(change);
    }

    /// Takes the first transition out of the current state whose guard passes. If none pass, runs
    /// the current state's update hook. Fails if no state has been set yet.
    pub fn update(&mut self, ctx: &mut C) -> CoreResult<()> {
        let current = self.current.clone().ok_or_else(|| {
            CoreError::PreconditionViolation(
                "StateMachine::update() called before a state was set".to_string(),
            )
        })?;
        let target = self
            .transitions
            .iter()
            .find(|transition| transition.from == current && (transition.guard)(&*ctx))
            .map(|transition| transition.to.clone());
        match target {
            Some(target) => self.set_state(&target, ctx),
            None => self.run_hook(&current, ctx, |hooks| hooks.on_update.as_mut()),
        }
        Ok(())
    }

    fn run_hook<F>(&mut self, state: &str, ctx: &mut C, pick: F)
    where
        F: FnOnce(&mut StateHooks<C>) -> Option<&mut Hook<C>>,
    {
        if let Some(hook) = self.states.get_mut(state).and_then(pick) {
            hook(ctx);
        }
    }
}

impl<C> Debug for StateMachine<C> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("states", &self.states.len())
            .field("transitions", &self.transitions.len())
            .finish()
    }
}
