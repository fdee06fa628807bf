use onboarding_gateway_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("onboarding gateway error: {err}");
        std::process::exit(1);
    }
}
