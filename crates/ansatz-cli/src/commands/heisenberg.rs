//! Heisenberg model command implementation.

use anyhow::Result;
use console::style;
use num_complex::Complex64;
use serde::Serialize;

use ansatz_models::{Boundary, HeisenbergModel, Lattice, LatticeModel, SpinOp};

use super::common::{OutputFormat, write_output};

#[derive(Debug, Serialize)]
struct HeisenbergReport {
    num_sites: usize,
    boundary: Boundary,
    hamiltonian: SpinOp,
    interaction_matrix: Vec<Vec<Complex64>>,
}

/// Build the model on a line of `num_sites` sites.
pub fn model(num_sites: usize, interaction: f64, onsite: f64, periodic: bool) -> HeisenbergModel {
    let boundary = if periodic {
        Boundary::Periodic
    } else {
        Boundary::Open
    };
    let lattice = Lattice::line(
        num_sites,
        Complex64::new(interaction, 0.0),
        Complex64::new(onsite, 0.0),
        boundary,
    );
    HeisenbergModel::new(lattice)
}

/// Execute the heisenberg command.
pub fn execute(
    num_sites: usize,
    interaction: f64,
    onsite: f64,
    periodic: bool,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<()> {
    if num_sites == 0 {
        anyhow::bail!("A lattice needs at least one site");
    }
    eprintln!(
        "{} Building Heisenberg model on {} sites (J = {}, h = {})",
        style("→").cyan().bold(),
        style(num_sites).yellow(),
        interaction,
        onsite
    );

    let model = model(num_sites, interaction, onsite, periodic);
    let hamiltonian = model.second_q_ops();
    eprintln!(
        "{} {} terms on {} bonds",
        style("✓").green().bold(),
        hamiltonian.len(),
        model.lattice().num_edges()
    );

    let report = HeisenbergReport {
        num_sites,
        boundary: if periodic {
            Boundary::Periodic
        } else {
            Boundary::Open
        },
        interaction_matrix: model
            .interaction_matrix()
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect(),
        hamiltonian,
    };
    write_output(&report, format, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_chain_with_field() {
        let op = model(3, 1.0, 0.5, false).second_q_ops();
        assert_eq!(op.len(), 2 * 3 + 3);
    }

    #[test]
    fn test_two_site_ring_has_single_bond() {
        let m = model(2, 1.0, 0.0, true);
        assert_eq!(m.lattice().num_edges(), 1);
    }
}
