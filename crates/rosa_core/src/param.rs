//! Symbolic gate parameters
//!
//! Gantree: L1_Circuit → Param
//!
//! Gate arguments are either concrete numbers, named symbols, or small
//! function trees over both. Symbols are bound by a [`ParamResolver`];
//! a [`Sweep`] is an ordered list of resolvers.

use crate::error::{RosaError, RosaResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Function applied to argument expressions
/// Gantree: FuncOp // add, mul, pow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuncOp {
    /// Sum of all arguments
    Add,
    /// Product of all arguments
    Mul,
    /// `args[0] ^ args[1]`
    Pow,
}

impl FuncOp {
    /// Operator name
    pub fn name(&self) -> &'static str {
        match self {
            FuncOp::Add => "add",
            FuncOp::Mul => "mul",
            FuncOp::Pow => "pow",
        }
    }
}

/// Gate argument expression
/// Gantree: ParamExpr // Scalar | Symbol | Func
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamExpr {
    /// Concrete value
    Scalar(f64),
    /// Named symbol bound at resolution time
    Symbol(String),
    /// Function over sub-expressions
    Func {
        /// Operator
        op: FuncOp,
        /// Operands
        args: Vec<ParamExpr>,
    },
}

impl ParamExpr {
    /// Symbol expression
    pub fn symbol(name: impl Into<String>) -> Self {
        ParamExpr::Symbol(name.into())
    }

    /// Sum of expressions
    pub fn add(args: Vec<ParamExpr>) -> Self {
        ParamExpr::Func {
            op: FuncOp::Add,
            args,
        }
    }

    /// Product of expressions
    pub fn mul(args: Vec<ParamExpr>) -> Self {
        ParamExpr::Func {
            op: FuncOp::Mul,
            args,
        }
    }

    /// `base ^ exponent`
    pub fn pow(base: ParamExpr, exponent: ParamExpr) -> Self {
        ParamExpr::Func {
            op: FuncOp::Pow,
            args: vec![base, exponent],
        }
    }

    /// Whether any symbol appears in the expression
    pub fn is_parameterized(&self) -> bool {
        match self {
            ParamExpr::Scalar(_) => false,
            ParamExpr::Symbol(_) => true,
            ParamExpr::Func { args, .. } => args.iter().any(ParamExpr::is_parameterized),
        }
    }

    /// Concrete value if the expression is a plain scalar
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            ParamExpr::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Collect symbol names into `out`
    pub fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        match self {
            ParamExpr::Scalar(_) => {}
            ParamExpr::Symbol(name) => {
                out.insert(name.clone());
            }
            ParamExpr::Func { args, .. } => {
                for arg in args {
                    arg.collect_symbols(out);
                }
            }
        }
    }

    /// Evaluate against a resolver
    /// Gantree: resolve(&self, resolver) -> Result<f64> // 값 계산
    pub fn resolve(&self, resolver: &ParamResolver) -> RosaResult<f64> {
        match self {
            ParamExpr::Scalar(v) => Ok(*v),
            ParamExpr::Symbol(name) => resolver
                .get(name)
                .ok_or_else(|| RosaError::UnresolvedSymbol(name.clone())),
            ParamExpr::Func { op, args } => {
                let values = args
                    .iter()
                    .map(|a| a.resolve(resolver))
                    .collect::<RosaResult<Vec<f64>>>()?;
                evaluate(*op, &values)
            }
        }
    }
}

fn evaluate(op: FuncOp, values: &[f64]) -> RosaResult<f64> {
    match op {
        FuncOp::Add | FuncOp::Mul if values.is_empty() => Err(RosaError::InvalidParameter(
            format!("{} needs at least one argument", op.name()),
        )),
        FuncOp::Add => Ok(values.iter().sum()),
        FuncOp::Mul => Ok(values.iter().product()),
        FuncOp::Pow => match values {
            [base, exponent] => Ok(base.powf(*exponent)),
            _ => Err(RosaError::InvalidParameter(format!(
                "pow takes 2 arguments, got {}",
                values.len()
            ))),
        },
    }
}

impl From<f64> for ParamExpr {
    fn from(value: f64) -> Self {
        ParamExpr::Scalar(value)
    }
}

impl From<&str> for ParamExpr {
    fn from(name: &str) -> Self {
        ParamExpr::Symbol(name.to_string())
    }
}

impl fmt::Display for ParamExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamExpr::Scalar(v) => write!(f, "{}", v),
            ParamExpr::Symbol(name) => write!(f, "{}", name),
            ParamExpr::Func { op, args } => {
                write!(f, "{}(", op.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

// ============================================================================
// Resolver / Sweep
// ============================================================================

/// Symbol bindings for one execution
/// Gantree: ParamResolver // 심볼 → 값
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamResolver {
    values: BTreeMap<String, f64>,
}

impl ParamResolver {
    /// Empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, builder style
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Bind `name` to `value`
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Look up a binding
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over bindings in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, f64)> for ParamResolver {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Ordered parameter bindings executed against one circuit
pub type Sweep = Vec<ParamResolver>;

// ============================================================================
// Tests
// ============================================================================
