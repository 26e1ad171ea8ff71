//! Basic example: sign a token, then parse it back
//!
//! Run with `RUST_LOG=newt=debug` to see each parsing step.

use newt::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newt=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== newt - Basic Example ===\n");

    let key = Key::cipher(*b"0123456789abcdef", *b"0123456789abcdef");

    // Step 1: Create and sign a token
    let mut token = Token::new(Aes128);
    token.claims.insert("sub", "user123");
    token.claims.set_expiration(clock::system_time() + 3600);
    let signed = token.signed_string(&key)?;
    println!("Token: {signed}\n");

    // Step 2: Parse it, accepting AES128 only
    let parser = Parser::new().valid_methods([Aes128::ALG]);
    let parsed = parser
        .parse(&signed, |token| {
            println!("  → Resolving key for alg {:?}", token.alg());
            Ok(key.clone())
        })
        .map_err(|err| err.into_parts().0)?;

    println!("  ✓ Valid: {}", parsed.valid);
    println!("  ✓ Subject: {:?}", parsed.claims.get("sub"));
    println!("  ✓ Expires: {:?}\n", parsed.claims.expiration());

    // Step 3: A rejected token still exposes its claims
    match Parser::new().valid_methods([Hs256::ALG]).parse(&signed, |_| Ok(key.clone())) {
        Ok(_) => println!("unexpected success"),
        Err(err) => {
            println!("  ✗ Rejected: {}", err);
            if let Some(token) = err.token() {
                println!("    claims were: {:?}", token.claims);
            }
        }
    }

    Ok(())
}
