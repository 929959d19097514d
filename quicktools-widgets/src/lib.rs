pub mod age;
pub mod bmi;
pub mod case;
pub mod common;
pub mod counter;
pub mod dates;
pub mod emi;
pub mod gst;
pub mod image64;
pub mod password;
pub mod percent;
pub mod qr;
pub mod slug;
pub mod stopwatch;
pub mod timer;
pub mod tip;
pub mod units;
pub mod urlcodec;

pub use age::AgeWidget;
pub use bmi::BmiWidget;
pub use case::CaseWidget;
pub use common::*;
pub use counter::{ByteCountWidget, WordCountWidget};
pub use dates::DaysBetweenWidget;
pub use emi::EmiWidget;
pub use gst::GstWidget;
pub use image64::ImageWidget;
pub use password::PasswordWidget;
pub use percent::PercentWidget;
pub use qr::QrWidget;
pub use slug::SlugWidget;
pub use stopwatch::StopwatchWidget;
pub use timer::CountdownWidget;
pub use tip::TipWidget;
pub use units::UnitWidget;
pub use urlcodec::UrlWidget;
