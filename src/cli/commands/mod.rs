pub mod eval;
pub mod hessian;
pub mod info;
pub mod jacobian;
