//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - circuit interchange and bounded simulation",
        style("qplay").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qplay-ir           Closed gate-set circuit IR");
    println!("  qplay-qasm         OpenQASM 2.0 emitter, parser and code generator");
    println!("  qplay-hal          Simulation backend abstraction");
    println!("  qplay-adapter-sim  Local statevector simulator");
    println!("  qplay-engine       Request surface with per-call deadlines");
    println!("  qplay-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
