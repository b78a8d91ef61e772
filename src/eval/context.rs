//! Evaluation context
//!
//! A `Context` is an immutable snapshot: globals, a chain of local frames,
//! the effect bridge and the current call depth. Nothing mutates it in
//! place. `extend`, `enter`, `nested` and `define` all hand back a new
//! context and leave the receiver untouched, so a context can be shared by
//! reference through every primitive call without anyone observing a change.
//!
//! Lambdas capture the local [`Scope`] only. Globals are looked up in the
//! caller's context, which lets a top-level definition refer to itself.

use super::bridge::EffectBridge;
use super::builtins;
use super::Fault;
use crate::ast::Value;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub const DEFAULT_MAX_DEPTH: usize = 400;

struct Frame {
    bindings: Vec<(String, Value)>,
    parent: Scope,
}

/// A persistent chain of local frames
#[derive(Clone, Default)]
pub struct Scope(Option<Rc<Frame>>);

impl Scope {
    fn lookup(&self, name: &str) -> Option<&Value> {
        let mut current = self.0.as_deref();
        while let Some(frame) = current {
            if let Some((_, value)) = frame.bindings.iter().rev().find(|(n, _)| n == name) {
                return Some(value);
            }
            current = frame.parent.0.as_deref();
        }
        None
    }
}

#[derive(Clone)]
pub struct Context {
    globals: Rc<HashMap<String, Value>>,
    scope: Scope,
    bridge: Rc<dyn EffectBridge>,
    depth: usize,
    max_depth: usize,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("globals", &self.globals.len())
            .field("depth", &self.depth)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl Context {
    /// A root context with every builtin bound
    pub fn new(bridge: Rc<dyn EffectBridge>) -> Self {
        Context {
            globals: Rc::new(builtins::globals()),
            scope: Scope::default(),
            bridge,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn bridge(&self) -> &dyn EffectBridge {
        self.bridge.as_ref()
    }

    /// Locals first, innermost frame outward, then globals
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.scope
            .lookup(name)
            .or_else(|| self.globals.get(name))
            .cloned()
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.scope.lookup(name).is_some() || self.globals.contains_key(name)
    }

    /// The local scope, for closures to capture
    pub fn scope(&self) -> Scope {
        self.scope.clone()
    }

    /// A context with one more local frame
    pub fn extend(&self, bindings: Vec<(String, Value)>) -> Context {
        let mut next = self.clone();
        next.scope = Scope(Some(Rc::new(Frame {
            bindings,
            parent: self.scope.clone(),
        })));
        next
    }

    /// A context for running a closure body: the closure's captured scope,
    /// this context's globals and bridge, one level deeper
    pub fn enter(&self, scope: &Scope) -> Result<Context, Fault> {
        let depth = self.depth + 1;
        if depth > self.max_depth {
            return Err(Fault::RecursionLimit(self.max_depth));
        }
        let mut next = self.clone();
        next.scope = scope.clone();
        next.depth = depth;
        Ok(next)
    }

    /// The same bindings one level deeper. Every compound form goes through
    /// here, so nesting that never calls a lambda is still bounded.
    pub fn nested(&self) -> Result<Context, Fault> {
        let depth = self.depth + 1;
        if depth > self.max_depth {
            return Err(Fault::RecursionLimit(self.max_depth));
        }
        let mut next = self.clone();
        next.depth = depth;
        Ok(next)
    }

    /// A context with a new global binding. The receiver keeps its own
    /// globals; only the returned context sees the binding.
    pub fn define(&self, name: impl Into<String>, value: Value) -> Context {
        let mut next = self.clone();
        Rc::make_mut(&mut next.globals).insert(name.into(), value);
        next
    }
}
