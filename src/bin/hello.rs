pub use otf_proxy::api::hello::function_handler as handler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    otf_proxy::setup_logging();
    lambda_runtime::run(lambda_runtime::service_fn(handler)).await
}
