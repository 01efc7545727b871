//! Probe command - check which endpoints the service answers on

use tasklist::output::ProbeResult;

use super::Context;

/// Request every known endpoint and report the status codes
pub async fn probe(ctx: &Context) -> anyhow::Result<()> {
    let client = ctx.client();
    let endpoints = client.probe_endpoints().await;
    let reachable = endpoints.iter().any(|p| p.reachable());

    let result = ProbeResult {
        base_url: client.base_url().to_string(),
        endpoints,
    };
    result.render(ctx.mode);

    if !reachable {
        std::process::exit(1);
    }
    Ok(())
}
