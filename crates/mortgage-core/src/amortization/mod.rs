pub mod payment;
pub mod schedule;

pub use payment::{compute_payment, compute_payment_for, LoanInputs};
pub use schedule::{
    compute_schedule, compute_schedule_for, schedule_rows, AmortizationRow,
    AmortizationSchedule, ScheduleIter,
};
