//! Fake data generators backed by the `fake` crate.

use std::str::FromStr;

use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::boolean::en::Boolean;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{FreeEmail, SafeEmail, Username};
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use serde_json::{Value, json};

use crate::error::FactoryError;

/// Kinds of fake values a blueprint field can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FakerType {
	/// Full person name.
	Name,
	/// Given name.
	FirstName,
	/// Family name.
	LastName,
	/// Login name.
	Username,
	/// Email address on a free-mail domain.
	Email,
	/// Email address on an `example.*` domain.
	SafeEmail,
	/// Single lorem word.
	Word,
	/// Lorem sentence.
	Sentence,
	/// Lorem paragraph.
	Paragraph,
	/// Company name.
	Company,
	/// City name.
	City,
	/// Phone number.
	PhoneNumber,
	/// Boolean, evenly distributed.
	Boolean,
	/// Integer in `1..10_000`.
	Integer,
	/// Random v4 UUID string.
	Uuid,
	/// RFC 3339 timestamp within the past year.
	DateTime,
}

impl FakerType {
	/// Every supported generator.
	pub const ALL: [FakerType; 16] = [
		Self::Name,
		Self::FirstName,
		Self::LastName,
		Self::Username,
		Self::Email,
		Self::SafeEmail,
		Self::Word,
		Self::Sentence,
		Self::Paragraph,
		Self::Company,
		Self::City,
		Self::PhoneNumber,
		Self::Boolean,
		Self::Integer,
		Self::Uuid,
		Self::DateTime,
	];

	/// Name used in definition files.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Name => "name",
			Self::FirstName => "first_name",
			Self::LastName => "last_name",
			Self::Username => "username",
			Self::Email => "email",
			Self::SafeEmail => "safe_email",
			Self::Word => "word",
			Self::Sentence => "sentence",
			Self::Paragraph => "paragraph",
			Self::Company => "company",
			Self::City => "city",
			Self::PhoneNumber => "phone_number",
			Self::Boolean => "boolean",
			Self::Integer => "integer",
			Self::Uuid => "uuid",
			Self::DateTime => "date_time",
		}
	}

	/// Generates a fresh value.
	pub fn generate(&self) -> Value {
		match self {
			Self::Name => json!(Name().fake::<String>()),
			Self::FirstName => json!(FirstName().fake::<String>()),
			Self::LastName => json!(LastName().fake::<String>()),
			Self::Username => json!(Username().fake::<String>()),
			Self::Email => json!(FreeEmail().fake::<String>()),
			Self::SafeEmail => json!(SafeEmail().fake::<String>()),
			Self::Word => json!(Word().fake::<String>()),
			Self::Sentence => json!(Sentence(3..8).fake::<String>()),
			Self::Paragraph => json!(Paragraph(2..4).fake::<String>()),
			Self::Company => json!(CompanyName().fake::<String>()),
			Self::City => json!(CityName().fake::<String>()),
			Self::PhoneNumber => json!(PhoneNumber().fake::<String>()),
			Self::Boolean => json!(Boolean(50).fake::<bool>()),
			Self::Integer => json!((1..10_000i64).fake::<i64>()),
			Self::Uuid => json!(uuid::Uuid::new_v4().to_string()),
			Self::DateTime => {
				let seconds_ago = (0..31_536_000i64).fake::<i64>();
				let at = chrono::Utc::now() - chrono::Duration::seconds(seconds_ago);
				json!(at.to_rfc3339())
			}
		}
	}
}

impl FromStr for FakerType {
	type Err = FactoryError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.iter()
			.copied()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| FactoryError::ParseError(format!("Unknown faker type '{}'", s)))
	}
}

impl std::fmt::Display for FakerType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
