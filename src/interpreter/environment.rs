use std::{
    collections::{HashMap, HashSet},
    rc::Rc,
};

use crate::{
    ast::ValueType,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, range::RangeValue},
    },
};

/// Index of a scope in the [`Environment`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The scope holding the always-available native functions.
    pub const PRELUDE: Self = Self(0);
    /// The program's top-level scope.
    pub const GLOBAL: Self = Self(1);
}

/// A named, typed storage slot.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Declared type; every stored value has been coerced to it.
    pub value_type: ValueType,
    /// The name the variable is bound under.
    pub name:       String,
    /// Whether assignments after the declaration are rejected.
    pub constant:   bool,
    /// Range every stored number must belong to.
    pub range:      Option<RangeValue>,
    /// Current value.
    pub value:      Value,
}

/// Where a scope slot is in its life.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Lifetime {
    /// Pushed and not yet released.
    #[default]
    Open,
    /// Released, but kept for the functions that captured it.
    Closed,
    /// Reclaimed; the slot is reused by the next push.
    Free,
}

/// One frame of bindings.
#[derive(Debug, Default)]
struct Scope {
    parent:    Option<ScopeId>,
    variables: HashMap<String, Variable>,
    retained:  bool,
    lifetime:  Lifetime,
}

/// Closed scopes allowed to pile up before the first collection.
const COLLECT_THRESHOLD: usize = 32;

/// Arena of lexical scopes.
///
/// Scopes form a tree through their parent links. A scope captured by a
/// function value is retained: releasing it only closes it, and it is
/// reclaimed by [`collect`](Self::collect) once no reachable function
/// refers to it. Any other scope is reclaimed when released.
#[derive(Debug)]
pub struct Environment {
    scopes:          Vec<Scope>,
    free:            Vec<ScopeId>,
    closed:          usize,
    next_collection: usize,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment with an empty prelude and a global scope.
    #[must_use]
    pub fn new() -> Self {
        let prelude = Scope { retained: true,
                              ..Scope::default() };
        let global = Scope { parent: Some(ScopeId::PRELUDE),
                             retained: true,
                             ..Scope::default() };
        Self { scopes:          vec![prelude, global],
               free:            Vec::new(),
               closed:          0,
               next_collection: COLLECT_THRESHOLD, }
    }

    /// Opens a child scope of `parent`.
    pub fn push(&mut self, parent: ScopeId) -> ScopeId {
        let scope = Scope { parent: Some(parent),
                            ..Scope::default() };
        if let Some(id) = self.free.pop() {
            self.scopes[id.0] = scope;
            return id;
        }
        self.scopes.push(scope);
        ScopeId(self.scopes.len() - 1)
    }

    /// Closes a scope opened by [`push`](Self::push).
    ///
    /// A scope no function captured is reclaimed at once. A retained one
    /// stays until a collection finds it unreachable.
    pub fn release(&mut self, id: ScopeId) {
        if id.0 <= ScopeId::GLOBAL.0 {
            return;
        }
        let Some(scope) = self.scopes.get_mut(id.0) else {
            return;
        };
        if scope.lifetime != Lifetime::Open {
            return;
        }

        if scope.retained {
            scope.lifetime = Lifetime::Closed;
            self.closed += 1;
            if self.closed >= self.next_collection {
                self.collect();
            }
        } else {
            self.reclaim(id);
            self.trim();
        }
    }

    /// Keeps `id` and its ancestors alive for a function that captured it.
    pub fn retain(&mut self, id: ScopeId) {
        let mut current = Some(id);
        while let Some(scope) = current.and_then(|id| self.scopes.get_mut(id.0)) {
            if scope.retained {
                break;
            }
            scope.retained = true;
            current = scope.parent;
        }
    }

    /// Number of scopes not yet reclaimed, the prelude and global included.
    #[must_use]
    pub fn live_scopes(&self) -> usize {
        self.scopes.iter().filter(|scope| scope.lifetime != Lifetime::Free).count()
    }

    /// Reclaims every closed scope that no live function can reach.
    ///
    /// Open scopes are roots, and so is every function or container held
    /// outside the arena: one whose reference count exceeds the references
    /// found in scope variables. From the roots, a scope reaches its parent
    /// and the values of its variables, and a function reaches the scope it
    /// captured.
    pub fn collect(&mut self) {
        let mut heap = Heap::default();
        let held: Vec<Vec<ObjectId>> =
            self.scopes
                .iter()
                .map(|scope| match scope.lifetime {
                    Lifetime::Free => Vec::new(),
                    _ => heap.visit_all(scope.variables.values().map(|variable| &variable.value)),
                })
                .collect();

        let mut reached = vec![false; self.scopes.len()];
        let mut seen = HashSet::new();
        let mut scopes: Vec<ScopeId> = self.scopes
                                           .iter()
                                           .enumerate()
                                           .filter(|(_, scope)| scope.lifetime == Lifetime::Open)
                                           .map(|(i, _)| ScopeId(i))
                                           .collect();
        let mut objects = heap.roots();

        loop {
            if let Some(object) = objects.pop() {
                if seen.insert(object)
                   && let Some(node) = heap.nodes.get(&object)
                {
                    scopes.extend(&node.scopes);
                    objects.extend(&node.children);
                }
            } else if let Some(id) = scopes.pop() {
                if let Some(flag) = reached.get_mut(id.0)
                   && !*flag
                {
                    *flag = true;
                    scopes.extend(self.scopes[id.0].parent);
                    objects.extend(&held[id.0]);
                }
            } else {
                break;
            }
        }

        for (i, reached) in reached.into_iter().enumerate() {
            if !reached && self.scopes[i].lifetime == Lifetime::Closed {
                self.reclaim(ScopeId(i));
            }
        }
        self.trim();

        self.closed = self.scopes
                          .iter()
                          .filter(|scope| scope.lifetime == Lifetime::Closed)
                          .count();
        self.next_collection = COLLECT_THRESHOLD.max(2 * self.closed);
    }

    fn reclaim(&mut self, id: ScopeId) {
        self.scopes[id.0] = Scope { lifetime: Lifetime::Free,
                                    ..Scope::default() };
        self.free.push(id);
    }

    /// Drops free slots from the end of the arena.
    fn trim(&mut self) {
        while self.scopes.last().is_some_and(|scope| scope.lifetime == Lifetime::Free) {
            self.scopes.pop();
        }
        let len = self.scopes.len();
        self.free.retain(|id| id.0 < len);
    }

    /// Adds a variable to exactly `scope`.
    ///
    /// # Errors
    /// [`RuntimeError::VariableAlreadyDeclared`] if `scope` already binds the
    /// name. Outer bindings may be shadowed.
    pub fn declare(&mut self, scope: ScopeId, variable: Variable, line: usize) -> EvalResult<()> {
        let variables = &mut self.scopes[scope.0].variables;
        if variables.contains_key(&variable.name) {
            return Err(RuntimeError::VariableAlreadyDeclared { name: variable.name,
                                                               line });
        }
        variables.insert(variable.name.clone(), variable);
        Ok(())
    }

    /// Binds a variable in `scope`, replacing any binding of the same name.
    pub(crate) fn bind(&mut self, scope: ScopeId, variable: Variable) {
        self.scopes[scope.0].variables.insert(variable.name.clone(), variable);
    }

    /// The binding of `name` in exactly `scope`, ignoring its parents.
    #[must_use]
    pub fn declared_in(&self, scope: ScopeId, name: &str) -> Option<&Variable> {
        self.scopes.get(scope.0).and_then(|frame| frame.variables.get(name))
    }

    /// Finds the binding of `name` visible from `scope`.
    ///
    /// # Errors
    /// [`RuntimeError::VariableNotDeclared`] if no enclosing scope binds it.
    pub fn lookup(&self, scope: ScopeId, name: &str, line: usize) -> EvalResult<&Variable> {
        self.resolve(scope, name)
            .and_then(|id| self.scopes[id.0].variables.get(name))
            .ok_or_else(|| RuntimeError::VariableNotDeclared { name: name.to_string(),
                                                               line })
    }

    /// Gets the current value of `name` as seen from `scope`.
    ///
    /// # Errors
    /// [`RuntimeError::VariableNotDeclared`] if no enclosing scope binds it.
    pub fn get(&self, scope: ScopeId, name: &str, line: usize) -> EvalResult<Value> {
        self.lookup(scope, name, line).map(|variable| variable.value.clone())
    }

    /// Overwrites the value of an existing, non-constant binding in place.
    ///
    /// The value must already be coerced to the variable's type.
    ///
    /// # Errors
    /// - [`RuntimeError::VariableNotDeclared`] if no enclosing scope binds it.
    /// - [`RuntimeError::ConstantAssignment`] if the binding is a constant.
    pub fn assign(&mut self,
                  scope: ScopeId,
                  name: &str,
                  value: Value,
                  line: usize)
                  -> EvalResult<()> {
        let variable = self.resolve(scope, name)
                           .and_then(|id| self.scopes[id.0].variables.get_mut(name))
                           .ok_or_else(|| RuntimeError::VariableNotDeclared { name: name.to_string(),
                                                                              line })?;
        if variable.constant {
            return Err(RuntimeError::ConstantAssignment { name: name.to_string(),
                                                          line });
        }
        variable.value = value;
        Ok(())
    }

    /// The nearest scope, starting at `scope`, that binds `name`.
    fn resolve(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let frame = self.scopes.get(id.0)?;
            if frame.variables.contains_key(name) {
                return Some(id);
            }
            current = frame.parent;
        }
        None
    }
}

/// Identity of a shared function or container.
type ObjectId = *const ();

/// A shared object found while walking the arena.
#[derive(Debug, Default)]
struct Node {
    strong:   usize,
    held:     usize,
    scopes:   Vec<ScopeId>,
    children: Vec<ObjectId>,
}

/// The functions and containers reachable from scope variables.
#[derive(Debug, Default)]
struct Heap {
    nodes: HashMap<ObjectId, Node>,
}

impl Heap {
    /// Records one reference to `value` from inside the arena and returns
    /// its identity when it is a function or a container.
    fn visit(&mut self, value: &Value) -> Option<ObjectId> {
        let (id, strong) = match value {
            Value::Function(function) => (Rc::as_ptr(function).cast::<()>(), Rc::strong_count(function)),
            Value::List(items) | Value::Stack(items) => (Rc::as_ptr(items).cast::<()>(), Rc::strong_count(items)),
            Value::Queue(items) => (Rc::as_ptr(items).cast::<()>(), Rc::strong_count(items)),
            _ => return None,
        };
        if let Some(node) = self.nodes.get_mut(&id) {
            node.held += 1;
            return Some(id);
        }
        self.nodes.insert(id,
                          Node { strong,
                                 held: 1,
                                 ..Node::default() });

        let (scopes, children) = match value {
            Value::Function(function) => (vec![function.closure], Vec::new()),
            Value::List(items) | Value::Stack(items) => (Vec::new(), self.visit_all(items.borrow().iter())),
            Value::Queue(items) => (Vec::new(), self.visit_all(items.borrow().iter())),
            _ => (Vec::new(), Vec::new()),
        };
        if let Some(node) = self.nodes.get_mut(&id) {
            node.scopes = scopes;
            node.children = children;
        }
        Some(id)
    }

    fn visit_all<'a>(&mut self, values: impl Iterator<Item = &'a Value>) -> Vec<ObjectId> {
        values.filter_map(|value| self.visit(value)).collect()
    }

    /// Objects also referenced from outside the arena, such as a value
    /// being returned.
    fn roots(&self) -> Vec<ObjectId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.strong > node.held)
            .map(|(id, _)| *id)
            .collect()
    }
}
