//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - variational circuits and pulse schedules",
        style("Ansatz").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  ansatz-ir      Circuits, parameters and pulse schedules");
    println!("  ansatz-hal     Pulse backend abstraction");
    println!("  ansatz-forms   RVB, HVA and cross-resonance ansätze");
    println!("  ansatz-models  Lattice spin Hamiltonians");
    println!("  ansatz-cli     Command-line interface");
    println!();
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
