//! The happy-path order pipeline: validate, filter, calculate, approve,
//! then deliver to a single `add` destination.

use handler_chain::{Destination, HandlerChain, InMemoryStore, Processor};
use serde_json::json;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let validate = Processor::filter(
        "validate",
        Arc::new(|ctx| {
            Box::pin(async move {
                let content = ctx.get_content();
                let has_fields = content.get("unitPrice").is_some() && content.get("quantity").is_some();
                Ok((ctx, has_fields))
            })
        }),
    );

    let calc = Processor::transformer(
        "calc",
        Arc::new(|ctx| {
            Box::pin(async move {
                let mut content = ctx.get_content();
                let unit_price = content["unitPrice"].as_f64().unwrap_or(0.0);
                let quantity = content["quantity"].as_f64().unwrap_or(0.0);
                content["amount"] = json!(unit_price * quantity);
                Ok((ctx, content))
            })
        }),
    );

    let approve = Processor::generic(
        "approve_order",
        Arc::new(|mut ctx| {
            Box::pin(async move {
                let amount = ctx.get_content()["amount"].as_f64().unwrap_or(0.0);
                if amount > 100_000.0 {
                    return Err(handler_chain::HandlerError::new("Order amount exceeds limit"));
                }
                let mut content = ctx.get_content();
                content["status"] = json!("APPROVED");
                ctx.set_content(content);
                Ok(ctx)
            })
        }),
    );

    let add = Destination::new(
        "add",
        Arc::new(|ctx| {
            Box::pin(async move {
                let _ = ctx.get_content();
                Ok(json!("ok"))
            })
        }),
    );

    let failure_store = Arc::new(InMemoryStore::new());
    let chain = HandlerChain::builder()
        .name("orders")
        .processors(vec![validate, calc, approve])
        .destinations(vec![add])
        .failure_store(failure_store)
        .build()?;

    let outcome = chain
        .execute(json!({"id": "OR00001", "unitPrice": 100, "quantity": 2, "status": "PENDING"}))
        .await;

    match outcome {
        Ok(success) => {
            println!("destination results: {:?}", success.destination_results);
            println!("final message: {:?}", success.message);
        }
        Err(failure) => {
            println!("execution failed: {} (message: {:?})", failure.error, failure.message);
        }
    }

    Ok(())
}
