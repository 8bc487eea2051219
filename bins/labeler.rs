#[path = "bootstrap.rs"]
mod bootstrap;

fn main() -> std::process::ExitCode {
    bootstrap::run("labeler", server::run_labeler)
}
