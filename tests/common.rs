//! Common test utilities: compilers, evaluation helpers and published digest vectors.
use oddhash::prelude::*;
use std::sync::Arc;

use oddhash::compiler::diagnostics::RecordingDiagnostics;

#[allow(dead_code)]
pub const SHA256_ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
#[allow(dead_code)]
pub const SHA1_ABC: &str = "a9993e364706816aba3e25717850c26c9cd0d89d";
#[allow(dead_code)]
pub const MD5_ABC: &str = "900150983cd24fb0d6963f7d28e17f72";
#[allow(dead_code)]
pub const MD5_EMPTY: &str = "d41d8cd98f00b204e9800998ecf8427e";

/// Compiles a notation that must depend on the password.
#[allow(dead_code)]
pub fn evaluator(compiler: &Compiler, notation: &str) -> Evaluator {
    match compiler.compile(notation) {
        Ok(Compiled::Evaluator(evaluator)) => evaluator,
        Ok(Compiled::Constant(bytes)) => {
            panic!("'{}' folded to a constant: {:?}", notation, bytes)
        }
        Err(e) => panic!("failed to compile '{}': {}", notation, e),
    }
}

/// Evaluates a notation and returns the output as text.
#[allow(dead_code)]
pub fn hash_text(notation: &str, password: &[u8]) -> String {
    let digest = evaluator(&Compiler::new(), notation)
        .eval(password)
        .expect("evaluation failed");
    String::from_utf8(digest).expect("hex output should be text")
}

/// A compiler with a salt, returning the recorder it reports to.
#[allow(dead_code)]
pub fn recording_compiler(salt: &[u8]) -> (Compiler, Arc<RecordingDiagnostics>) {
    let recorder = Arc::new(RecordingDiagnostics::new());
    let compiler = Compiler::builder()
        .with_salt(salt.to_vec())
        .with_diagnostics(recorder.clone())
        .build();
    (compiler, recorder)
}

#[allow(dead_code)]
pub fn unhex(text: &str) -> Vec<u8> {
    hex::decode(text).expect("invalid hex in test vector")
}
