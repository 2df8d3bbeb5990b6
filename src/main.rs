use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match swarm_node_monitor::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("swarm-node-monitor: {error}");
            ExitCode::FAILURE
        }
    }
}
