pub mod checkout;
pub mod commands;
pub mod git;
pub mod ignore;
pub mod prompt;
pub mod validation;
