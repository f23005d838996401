pub mod budget_type;
pub mod course;
pub mod facility;
pub mod material;
pub mod material_type;
pub mod record;
pub mod screen;

pub use budget_type::BudgetType;
pub use course::{Course, CourseLevel, CurriculumSection, Faq};
pub use facility::{Facility, FacilityPatch};
pub use material::Material;
pub use material_type::MaterialType;
pub use record::{Draft, Editable, Record, RecordId};
pub use screen::Screen;
