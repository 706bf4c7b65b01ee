//! Default binary - shows help text.

fn main() {
    println!("netwatch-discovery {} - local-network device discovery", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Available commands:");
    println!("  netwatch-server    Run the HTTP facade (POST /run-discovery, GET /discovery.json)");
    println!("  netwatch-discover  Run discovery from the command line");
    println!();
    println!("For more information, run any command with --help");
}
