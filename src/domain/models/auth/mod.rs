pub mod authenticated_member;

pub use authenticated_member::AuthenticatedMember;
