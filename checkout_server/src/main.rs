use checkout_engine::events::{EventHooks, OrderPaidEvent};
use checkout_server::{cli::handle_command_line_args, config::ServerConfig, server::run_server};
use dotenvy::dotenv;
use log::*;

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    if handle_command_line_args() {
        return;
    }
    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("🚫️ {e}");
            std::process::exit(1);
        },
    };

    let mut hooks = EventHooks::default();
    hooks.on_order_paid(|ev: OrderPaidEvent| {
        Box::pin(async move {
            info!(
                "💰️ Order {} is paid. {} {} (payment {})",
                ev.order.order_id, ev.order.amount, ev.order.currency, ev.payment.payment_id
            );
        })
    });

    info!("🚀️ Starting server on {}:{}", config.host, config.port);
    match run_server(config, hooks).await {
        Ok(_) => println!("Bye!"),
        Err(e) => eprintln!("{e}"),
    }
}
