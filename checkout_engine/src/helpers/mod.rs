mod signature;

pub use signature::{
    compute_signature,
    payment_signature_message,
    verify_signature,
    SignatureError,
    SignatureVerifier,
};
