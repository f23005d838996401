pub mod audit;
pub mod columns;
pub mod facility_store;
pub mod filter;
pub mod form;
pub mod ids;
pub mod list;
pub mod modal;
pub mod paginate;
pub mod repository;
pub mod seed;
pub mod validation;
pub mod wizard;
pub mod workspace;
