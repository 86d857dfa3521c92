//! # oddhash - Hash Notation Compiler
//!
//! **oddhash** turns a compact notation for nested, salted and keyed hash
//! constructions into a reusable function of the password. The same compiled
//! function hashes a single password or is mapped over a wordlist to crack
//! hashes of an unusual format.
//!
//! ## Notation
//!
//! ```text
//! sha3_384(md5($s).keccak_512(blake2b_224($p)))
//! ```
//!
//! * `$p` is the password, `$s` the salt and `$m` the message. Salt and message
//!   are bound before compilation.
//! * `a.b` concatenates the bytes of `a` and `b`.
//! * `name_raw(...)` passes the binary digest on instead of its hex text.
//! * `hmac_name(...)` keys the algorithm with the password; the parenthesised
//!   expression is the HMAC message.
//! * `name_bits(...)` selects a digest size, either as a family parameter
//!   (`blake2b_224`) or as part of the registry name (`sha3_384`).
//!
//! ## Core Workflow
//!
//! 1.  **Compile**: build a `Compiler` with `Compiler::builder`, binding any salt or message.
//! 2.  **Check the result**: a notation that never reads the password folds to `Compiled::Constant`.
//! 3.  **Evaluate**: call `Evaluator::eval` with each password, from as many threads as you like.
//!
//! ## Quick Start
//!
//! ```rust
//! use oddhash::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let compiler = Compiler::builder().with_salt(b"pepper".to_vec()).build();
//!
//!     let compiled = compiler.compile("sha256($s.$p)")?;
//!     let evaluator = compiled.into_evaluator().ok_or("notation does not use the password")?;
//!
//!     let digest = evaluator.eval(b"hunter2")?;
//!     assert_eq!(digest.len(), 64);
//!     println!("{}", String::from_utf8_lossy(&digest));
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod compiler;
pub mod crack;
pub mod encoding;
pub mod error;
pub mod evaluator;
pub mod prelude;
pub mod registry;
