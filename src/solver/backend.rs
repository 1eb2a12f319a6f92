use good_lp::solvers::microlp::microlp;
use good_lp::{
    variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable,
};
use tracing::debug;

use crate::solver::{
    Comparison, LinearExpr, LinearProgram, LpSolution, Sense, Solver, SolverError, VariableDef,
    VariableKind,
};

/// [`Solver`] backed by `good_lp` and its pure Rust `microlp` simplex / branch-and-bound.
#[derive(Clone, Copy, Debug, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for MicroLpSolver {
    fn solve(&self, program: &LinearProgram) -> Result<LpSolution, SolverError> {
        debug!(
            variables = program.variables.len(),
            constraints = program.constraints.len(),
            integral = program.is_integral(),
            "solving linear program"
        );

        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = program
            .variables
            .iter()
            .map(|def| vars.add(definition(def)))
            .collect();

        let objective = expression(&program.objective, &handles);
        let unsolved = match program.sense {
            Sense::Maximize => vars.maximise(objective),
            Sense::Minimize => vars.minimise(objective),
        };
        let mut model = unsolved.using(microlp);

        for constraint in &program.constraints {
            let lhs = expression(&constraint.expr, &handles);
            let built = match constraint.comparison {
                Comparison::LessOrEqual => lhs.leq(constraint.rhs),
                Comparison::GreaterOrEqual => lhs.geq(constraint.rhs),
                Comparison::Equal => lhs.eq(constraint.rhs),
            };
            model.add_constraint(built);
        }

        let solution = model.solve()?;
        let values: Vec<f64> = handles.iter().map(|&v| solution.value(v)).collect();
        let objective = program.objective.evaluate(&values);

        Ok(LpSolution { values, objective })
    }
}

fn definition(def: &VariableDef) -> good_lp::VariableDefinition {
    let base = match def.kind {
        VariableKind::Continuous => variable(),
        VariableKind::Binary => variable().integer(),
    };
    base.min(def.lower).max(def.upper)
}

fn expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut res = Expression::with_capacity(expr.terms.len());
    for &(id, coefficient) in &expr.terms {
        res.add_mul(coefficient, handles[id]);
    }
    res + expr.constant
}

impl From<ResolutionError> for SolverError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Infeasible => SolverError::Infeasible,
            ResolutionError::Unbounded => SolverError::Unbounded,
            other => SolverError::Backend(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MicroLpSolver;
    use crate::solver::{
        Comparison, LinearExpr, LinearProgram, Sense, Solver, SolverError, VariableKind,
    };

    const EPS: f64 = 1e-6;

    #[test]
    fn solves_small_lp() {
        // max x + 2y  s.t.  x + y <= 1.5, 0 <= x, y <= 1
        let mut program = LinearProgram::new();
        let x = program.add_variable(VariableKind::Continuous, 0.0, 1.0);
        let y = program.add_variable(VariableKind::Continuous, 0.0, 1.0);
        let mut sum = LinearExpr::variable(x);
        sum.add_scaled(1.0, &LinearExpr::variable(y));
        program.add_constraint(sum, Comparison::LessOrEqual, 1.5);
        let mut objective = LinearExpr::variable(x);
        objective.add_scaled(2.0, &LinearExpr::variable(y));
        program.set_objective(objective, Sense::Maximize);

        let solution = MicroLpSolver::new().solve(&program).unwrap();
        assert!((solution.values[x] - 0.5).abs() < EPS);
        assert!((solution.values[y] - 1.0).abs() < EPS);
        assert!((solution.objective - 2.5).abs() < EPS);
    }

    #[test]
    fn binary_variables_are_integral() {
        // same program with binaries: best is y = 1, x = 0
        let mut program = LinearProgram::new();
        let x = program.add_variable(VariableKind::Binary, 0.0, 1.0);
        let y = program.add_variable(VariableKind::Binary, 0.0, 1.0);
        let mut sum = LinearExpr::variable(x);
        sum.add_scaled(1.0, &LinearExpr::variable(y));
        program.add_constraint(sum, Comparison::LessOrEqual, 1.5);
        let mut objective = LinearExpr::variable(x);
        objective.add_scaled(2.0, &LinearExpr::variable(y));
        program.set_objective(objective, Sense::Maximize);

        let solution = MicroLpSolver::new().solve(&program).unwrap();
        assert!(solution.values[x].abs() < EPS);
        assert!((solution.values[y] - 1.0).abs() < EPS);
        assert!((solution.objective - 2.0).abs() < EPS);
    }

    #[test]
    fn reports_infeasibility() {
        let mut program = LinearProgram::new();
        let x = program.add_variable(VariableKind::Continuous, 0.0, 1.0);
        program.add_constraint(LinearExpr::variable(x), Comparison::Equal, 2.0);
        program.set_objective(LinearExpr::variable(x), Sense::Minimize);

        let err = MicroLpSolver::new().solve(&program).unwrap_err();
        assert_eq!(SolverError::Infeasible, err);
    }
}
