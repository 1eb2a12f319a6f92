/// Index of a variable inside a [`LinearProgram`].
pub type VariableId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariableKind {
    Continuous,
    Binary,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableDef {
    pub kind: VariableKind,
    pub lower: f64,
    pub upper: f64,
}

/// `sum(coefficient * variable) + constant`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearExpr {
    pub terms: Vec<(VariableId, f64)>,
    pub constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// `x_a - x_b`
    pub fn difference(a: VariableId, b: VariableId) -> Self {
        Self {
            terms: vec![(a, 1.0), (b, -1.0)],
            constant: 0.0,
        }
    }

    pub fn variable(id: VariableId) -> Self {
        Self {
            terms: vec![(id, 1.0)],
            constant: 0.0,
        }
    }

    /// Adds `coefficient * other` to this expression.
    pub fn add_scaled(&mut self, coefficient: f64, other: &LinearExpr) {
        self.terms.extend(
            other
                .terms
                .iter()
                .map(|&(id, c)| (id, coefficient * c)),
        );
        self.constant += coefficient * other.constant;
    }

    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(id, c)| c * values[id])
            .sum::<f64>()
            + self.constant
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    LessOrEqual,
    GreaterOrEqual,
    Equal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinearConstraint {
    pub expr: LinearExpr,
    pub comparison: Comparison,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.comparison {
            Comparison::LessOrEqual => lhs <= self.rhs + tolerance,
            Comparison::GreaterOrEqual => lhs >= self.rhs - tolerance,
            Comparison::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    Maximize,
    Minimize,
}

/// Solver-independent description of a (mixed integer) linear program.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearProgram {
    pub variables: Vec<VariableDef>,
    pub constraints: Vec<LinearConstraint>,
    pub objective: LinearExpr,
    pub sense: Sense,
}

impl Default for LinearProgram {
    fn default() -> Self {
        Self {
            variables: vec![],
            constraints: vec![],
            objective: LinearExpr::new(),
            sense: Sense::Maximize,
        }
    }
}

impl LinearProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_variable(&mut self, kind: VariableKind, lower: f64, upper: f64) -> VariableId {
        self.variables.push(VariableDef { kind, lower, upper });
        self.variables.len() - 1
    }

    pub fn add_constraint(&mut self, expr: LinearExpr, comparison: Comparison, rhs: f64) {
        self.constraints.push(LinearConstraint {
            expr,
            comparison,
            rhs,
        });
    }

    pub fn set_objective(&mut self, objective: LinearExpr, sense: Sense) {
        self.objective = objective;
        self.sense = sense;
    }

    pub fn is_integral(&self) -> bool {
        self.variables
            .iter()
            .any(|v| v.kind == VariableKind::Binary)
    }
}
