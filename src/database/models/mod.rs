pub mod company;
pub mod job;
pub mod user;

pub use company::{Company, CompanyDetail, CompanyFilter, CompanyNew, CompanyUpdate};
pub use job::{Job, JobFilter, JobNew, JobSummary, JobUpdate};
pub use user::{User, UserNew, UserUpdate};
