// Utility Module - file plumbing around the core pipeline

pub mod file_ops;

pub use file_ops::{
    load_ciphertext, load_image, load_private_key, load_public_key, save_ciphertext, save_image,
    save_private_key, save_public_key, FileKeySink,
};
