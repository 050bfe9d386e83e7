//! Demo scenarios. Each one is a self-contained try / catch / finally chain.

use serde::Serialize;
use trycatch_core::failures::{NetworkFailure, RuleViolation, StorageFailure, ValidationFailure};
use trycatch_core::{CatchChain, ChainError, attempt, raise};

// ---- simulated business functions -----------------------------------------

fn validate_user(name: &str, email: &str, age: i32) {
    if name.is_empty() {
        raise(ValidationFailure::new("name", "name cannot be empty", 1001));
    }
    if !(0..=150).contains(&age) {
        raise(ValidationFailure::new("age", "age must be between 0 and 150", 1002));
    }
    if email == "invalid" {
        raise(ValidationFailure::new("email", "invalid email format", 1003));
    }
}

fn access_storage(operation: &str) {
    match operation {
        "delete_all" => raise(StorageFailure::new("DELETE", "users", "permission denied")),
        "timeout" => raise(StorageFailure::new("SELECT", "orders", "connection timeout")),
        _ => {}
    }
}

fn call_external_api(url: &str) {
    match url {
        "http://timeout.com" => raise(NetworkFailure::timeout(url)),
        "http://notfound.com" => raise(NetworkFailure::new(url, 404)),
        _ => {}
    }
}

fn process_order(order_type: &str) {
    if order_type == "refund" {
        raise(RuleViolation::new(
            "refund_policy",
            "refunds not allowed after 30 days",
        ));
    }
}

fn parse_number(s: &str) -> i32 {
    if s == "invalid" {
        raise("invalid number format");
    }
    match s.parse::<i32>() {
        Ok(n) => n,
        Err(e) => raise(e),
    }
}

// ---- demos -----------------------------------------------------------------

pub fn basic() {
    println!("=== Demo 1: basic usage ===");

    attempt(|| validate_user("", "test@example.com", 25))
        .catch::<ValidationFailure, _>(|e| {
            println!("✓ Caught ValidationFailure: {e}");
            println!("  Field: {}, Code: {}", e.field, e.code);
        })
        .finally(|| println!("  Cleanup completed"));
}

pub fn multiple() {
    println!("\n=== Demo 2: multiple failure types ===");

    let scenarios: [(&str, fn()); 4] = [
        ("ValidationFailure", || validate_user("", "test@example.com", 25)),
        ("StorageFailure", || access_storage("delete_all")),
        ("NetworkFailure", || call_external_api("http://timeout.com")),
        ("RuleViolation", || process_order("refund")),
    ];

    for (name, scenario) in scenarios {
        println!("\n--- Testing {name} ---");

        attempt(scenario)
            .catch::<ValidationFailure, _>(|e| {
                println!("✓ Validation issue: {} (Code: {})", e.message, e.code)
            })
            .catch::<StorageFailure, _>(|e| {
                println!("✓ Storage issue: {} on {}", e.operation, e.resource)
            })
            .catch::<NetworkFailure, _>(|e| {
                if e.timeout {
                    println!("✓ Network timeout: {}", e.url);
                } else {
                    println!("✓ Network error {}: {}", e.status_code, e.url);
                }
            })
            .catch::<RuleViolation, _>(|e| println!("✓ Business rule violation: {}", e.rule))
            .finally(|| println!("  Scenario completed"));
    }
}

pub fn builtin() {
    println!("\n=== Demo 3: built-in payload types ===");

    let scenarios: [(&str, fn()); 3] = [
        ("String failure", || {
            parse_number("invalid");
        }),
        ("Parse failure", || {
            parse_number("abc");
        }),
        ("Unknown failure", || {
            raise(3.5_f64);
        }),
    ];

    for (name, scenario) in scenarios {
        println!("\n--- Testing {name} ---");

        attempt(scenario)
            .catch::<&str, _>(|e| println!("✓ String failure: {e}"))
            .catch::<std::num::ParseIntError, _>(|e| println!("✓ Parse failure: {e}"))
            .catch_any(|p| println!("✓ Unknown failure: {}", p.describe()))
            .finally(|| println!("  Parsing attempt completed"));
    }
}

#[derive(Debug, Serialize)]
struct ValidationReport {
    success: bool,
    error: String,
    code: i32,
}

pub fn with_return() -> serde_json::Result<()> {
    println!("\n=== Demo 4: handlers that return a value ===");

    let (report, tb) = attempt(|| validate_user("John", "invalid", 25))
        .catch_with_return::<ValidationFailure, _, _>(|e| {
            println!("✓ Validation failed: {}", e.message);
            ValidationReport {
                success: false,
                error: e.to_string(),
                code: e.code,
            }
        });

    if let Some(report) = report {
        println!("  Return value: {}", serde_json::to_string(&report)?);
    }

    tb.finally(|| println!("  Demo 4 completed"));
    Ok(())
}

pub fn nested() {
    println!("\n=== Demo 5: nested captures ===");

    attempt(|| {
        println!("  Outer attempt started");

        attempt(|| {
            println!("    Inner attempt started");
            validate_user("", "test@example.com", 25);
        })
        .catch::<ValidationFailure, _>(|e| {
            println!("    ✓ Inner catch: {}", e.message);
            raise(RuleViolation::new(
                "user_validation",
                format!("failed inner validation: {}", e.field),
            ));
        })
        .finally(|| println!("    Inner finally"));

        println!("  This should not be reached");
    })
    .catch::<RuleViolation, _>(|e| println!("  ✓ Outer catch: {}", e.details))
    .finally(|| println!("  Nested example completed"));
}

/// One order-processing run, handled by a declarative chain.
fn process_user_order(user_id: &str, order_data: &str) -> Result<(), ChainError> {
    let tb = attempt(|| {
        if user_id.is_empty() {
            raise(ValidationFailure::new("user_id", "user ID is required", 2001));
        }
        if user_id == "blocked_user" {
            raise(StorageFailure::new("SELECT", "users", "user account blocked"));
        }
        if order_data == "payment_failed" {
            raise(NetworkFailure::new("https://payment.api.com", 402));
        }
        if order_data == "insufficient_stock" {
            raise(RuleViolation::new(
                "inventory_check",
                "requested quantity exceeds available stock",
            ));
        }
        println!("  ✓ Order processed successfully for user: {user_id}");
    });

    CatchChain::new()
        .on(|e: ValidationFailure| println!("  ✗ Input validation failed: {}", e.message))?
        .on(|e: StorageFailure| println!("  ✗ Storage operation failed: {}", e.cause))?
        .on(|e: NetworkFailure| {
            println!(
                "  ✗ External service error: {} from {}",
                e.status_code, e.url
            )
        })?
        .on(|e: RuleViolation| println!("  ✗ Business rule violation: {}", e.details))?
        .otherwise(|p| println!("  ✗ Unexpected failure: {}", p.describe()))?
        .run(tb, || {
            println!(
                "  Order processing completed for user: {user_id} at {}",
                chrono::Local::now().format("%H:%M:%S")
            )
        });
    Ok(())
}

pub fn orders() -> Result<(), ChainError> {
    println!("\n=== Demo 6: order processing ===");

    let cases = [
        ("user123", "valid_order", "success"),
        ("", "valid_order", "validation failure"),
        ("blocked_user", "valid_order", "storage failure"),
        ("user123", "payment_failed", "network failure"),
        ("user123", "insufficient_stock", "business rule violation"),
    ];

    for (i, (user_id, order_data, desc)) in cases.iter().enumerate() {
        println!("\n--- Test Case {}: {desc} ---", i + 1);
        process_user_order(user_id, order_data)?;
    }
    Ok(())
}
