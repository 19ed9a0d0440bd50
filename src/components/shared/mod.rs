pub mod instruction_footer;

pub use instruction_footer::InstructionFooter;
