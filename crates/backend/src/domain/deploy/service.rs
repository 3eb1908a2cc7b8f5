use std::io::Read;
use std::net::TcpStream;

use chrono::Utc;
use contracts::deployment::{DeploymentDetails, DeploymentRequest, DeploymentStatus, ServerConfig};
use ssh2::Session;

use super::{commands, DeployError};
use crate::domain::configs;

// Commands run over the standard SSH port; `server.port` is where the
// provisioned database will listen.
const SSH_PORT: u16 = 22;

/// Deploy a saved configuration to the target server
pub async fn deploy(
    user_id: &str,
    request: DeploymentRequest,
) -> Result<DeploymentStatus, DeployError> {
    // Ownership check before anything touches the network
    configs::service::get_owned(user_id, &request.config_id).await?;

    let server = request.server;
    let plan = commands::provisioning_plan(&server);

    tracing::info!(
        "Deploying {} to {} ({} commands)",
        server.database_type,
        server.host,
        plan.len()
    );

    let runner_server = server.clone();
    tokio::task::spawn_blocking(move || run_plan(&runner_server, &plan))
        .await
        .map_err(|e| DeployError::Connection(e.to_string()))??;

    Ok(DeploymentStatus {
        status: "success".to_string(),
        message: format!(
            "{} deployed successfully to {}",
            server.database_type, server.host
        ),
        details: Some(DeploymentDetails {
            host: server.host,
            port: server.port,
            database: server.database,
            timestamp: Utc::now().to_rfc3339(),
        }),
    })
}

fn run_plan(server: &ServerConfig, plan: &[String]) -> Result<(), DeployError> {
    let stream = TcpStream::connect((server.host.as_str(), SSH_PORT))
        .map_err(|e| DeployError::Connection(e.to_string()))?;

    let mut session = Session::new().map_err(|e| DeployError::Connection(e.to_string()))?;
    session.set_tcp_stream(stream);
    session
        .handshake()
        .map_err(|e| DeployError::Connection(e.to_string()))?;
    session
        .userauth_password(&server.username, &server.password)
        .map_err(|e| DeployError::Connection(format!("Authentication failed: {}", e)))?;

    for command in plan {
        run_command(&session, command)?;
    }

    Ok(())
}

fn run_command(session: &Session, command: &str) -> Result<(), DeployError> {
    let mut channel = session
        .channel_session()
        .map_err(|e| DeployError::Connection(e.to_string()))?;

    channel
        .exec(command)
        .map_err(|e| DeployError::Connection(e.to_string()))?;

    let mut output = String::new();
    let _ = channel.read_to_string(&mut output);
    let _ = channel.wait_close();

    let status = channel
        .exit_status()
        .map_err(|e| DeployError::Connection(e.to_string()))?;

    if status != 0 {
        tracing::error!("Command failed ({}): {}", status, output.trim());
        return Err(DeployError::Command {
            command: command.to_string(),
            status,
        });
    }

    Ok(())
}
