//! Pay stub model and its status lifecycle.
//!
//! A stub moves `draft → finalized → paid`, one step at a time and never
//! backwards. The rules live here so every store enforces the same contract
//! through [`PayStub::apply_update`].

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayPeriod;
use crate::error::{PayrollError, PayrollResult};

/// Lifecycle status of a pay stub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayStubStatus {
    /// Calculated, still open to recalculation.
    Draft,
    /// Approved; figures are locked.
    Finalized,
    /// Paid out on the stub's pay date.
    Paid,
}

impl PayStubStatus {
    /// Returns the only status this one may advance to, if any.
    pub fn next(self) -> Option<PayStubStatus> {
        match self {
            PayStubStatus::Draft => Some(PayStubStatus::Finalized),
            PayStubStatus::Finalized => Some(PayStubStatus::Paid),
            PayStubStatus::Paid => None,
        }
    }

    /// Returns true if `next` is exactly one step forward.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::PayStubStatus;
    ///
    /// assert!(PayStubStatus::Draft.can_advance_to(PayStubStatus::Finalized));
    /// assert!(!PayStubStatus::Draft.can_advance_to(PayStubStatus::Paid));
    /// assert!(!PayStubStatus::Paid.can_advance_to(PayStubStatus::Draft));
    /// ```
    pub fn can_advance_to(self, next: PayStubStatus) -> bool {
        self.next() == Some(next)
    }

    /// Returns the snake_case name used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            PayStubStatus::Draft => "draft",
            PayStubStatus::Finalized => "finalized",
            PayStubStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for PayStubStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rate-derived figures of a stub, stamped at calculation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStubFigures {
    /// The hourly rate the figures were calculated with.
    pub hourly_rate: Decimal,
    /// Hours paid at the ordinary rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime multiplier.
    pub overtime_hours: Decimal,
    /// Pay before deductions.
    pub gross_pay: Decimal,
    /// Pay after deductions. Equal to gross while no withholding is modelled.
    pub net_pay: Decimal,
}

impl PayStubFigures {
    /// Returns regular plus overtime hours.
    pub fn total_hours(&self) -> Decimal {
        self.regular_hours + self.overtime_hours
    }
}

/// A calculated stub that has not been persisted yet.
///
/// Stores assign the id and timestamps on create; stubs always start in
/// [`PayStubStatus::Draft`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayStub {
    /// The employee being paid.
    pub employee_id: String,
    /// Period start (inclusive).
    pub period_start: NaiveDate,
    /// Period end (inclusive).
    pub period_end: NaiveDate,
    /// Calculated figures.
    pub figures: PayStubFigures,
}

/// A persisted pay stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStub {
    /// Unique identifier for the stub.
    pub id: Uuid,
    /// The employee being paid.
    pub employee_id: String,
    /// Period start (inclusive).
    pub period_start: NaiveDate,
    /// Period end (inclusive).
    pub period_end: NaiveDate,
    /// The hourly rate the figures were calculated with.
    pub hourly_rate: Decimal,
    /// Hours paid at the ordinary rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime multiplier.
    pub overtime_hours: Decimal,
    /// Pay before deductions.
    pub gross_pay: Decimal,
    /// Pay after deductions.
    pub net_pay: Decimal,
    /// Lifecycle status.
    pub status: PayStubStatus,
    /// The date the stub was (or will be) paid.
    #[serde(default)]
    pub pay_date: Option<NaiveDate>,
    /// When the stub was created.
    pub created_at: DateTime<Utc>,
    /// When the stub was last changed.
    pub updated_at: DateTime<Utc>,
}

impl PayStub {
    /// Builds a draft stub from a calculation.
    pub fn from_new(new: NewPayStub, id: Uuid, now: DateTime<Utc>) -> Self {
        let NewPayStub {
            employee_id,
            period_start,
            period_end,
            figures,
        } = new;
        Self {
            id,
            employee_id,
            period_start,
            period_end,
            hourly_rate: figures.hourly_rate,
            regular_hours: figures.regular_hours,
            overtime_hours: figures.overtime_hours,
            gross_pay: figures.gross_pay,
            net_pay: figures.net_pay,
            status: PayStubStatus::Draft,
            pay_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the period the stub covers.
    pub fn period(&self) -> PayPeriod {
        PayPeriod {
            start_date: self.period_start,
            end_date: self.period_end,
        }
    }

    /// Returns the stamped figures.
    pub fn figures(&self) -> PayStubFigures {
        PayStubFigures {
            hourly_rate: self.hourly_rate,
            regular_hours: self.regular_hours,
            overtime_hours: self.overtime_hours,
            gross_pay: self.gross_pay,
            net_pay: self.net_pay,
        }
    }

    /// Returns true once the figures can no longer be recalculated.
    pub fn is_locked(&self) -> bool {
        self.status != PayStubStatus::Draft
    }

    /// Applies an update, enforcing the lifecycle.
    ///
    /// The stub is left untouched when an error is returned.
    pub fn apply_update(&mut self, update: PayStubUpdate, now: DateTime<Utc>) -> PayrollResult<()> {
        if self.status == PayStubStatus::Paid {
            return Err(PayrollError::StubLocked {
                stub_id: self.id,
                status: self.status,
            });
        }
        if update.figures.is_some() && self.is_locked() {
            return Err(PayrollError::StubLocked {
                stub_id: self.id,
                status: self.status,
            });
        }
        if let Some(next) = update.status {
            if !self.status.can_advance_to(next) {
                return Err(PayrollError::InvalidStatusTransition {
                    stub_id: self.id,
                    from: self.status,
                    to: next,
                });
            }
        }

        let status = update.status.unwrap_or(self.status);
        let pay_date = update.pay_date.or(self.pay_date);
        if status == PayStubStatus::Paid && pay_date.is_none() {
            return Err(PayrollError::MissingPayDate { stub_id: self.id });
        }

        if let Some(figures) = update.figures {
            self.hourly_rate = figures.hourly_rate;
            self.regular_hours = figures.regular_hours;
            self.overtime_hours = figures.overtime_hours;
            self.gross_pay = figures.gross_pay;
            self.net_pay = figures.net_pay;
        }
        self.status = status;
        self.pay_date = pay_date;
        self.updated_at = now;
        Ok(())
    }
}

/// A partial update to a [`PayStub`]. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStubUpdate {
    /// The status to advance to.
    #[serde(default)]
    pub status: Option<PayStubStatus>,
    /// The pay date to set.
    #[serde(default)]
    pub pay_date: Option<NaiveDate>,
    /// Recalculated figures, accepted only while the stub is a draft.
    #[serde(default)]
    pub figures: Option<PayStubFigures>,
}

impl PayStubUpdate {
    /// Advances a draft to finalized.
    pub fn finalize() -> Self {
        Self {
            status: Some(PayStubStatus::Finalized),
            ..Self::default()
        }
    }

    /// Marks a finalized stub as paid on `pay_date`.
    pub fn pay(pay_date: NaiveDate) -> Self {
        Self {
            status: Some(PayStubStatus::Paid),
            pay_date: Some(pay_date),
            ..Self::default()
        }
    }

    /// Replaces a draft's figures.
    pub fn recalculate(figures: PayStubFigures) -> Self {
        Self {
            figures: Some(figures),
            ..Self::default()
        }
    }
}
