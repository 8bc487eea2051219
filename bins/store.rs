#[path = "bootstrap.rs"]
mod bootstrap;

fn main() -> std::process::ExitCode {
    bootstrap::run("store", server::run_store)
}
