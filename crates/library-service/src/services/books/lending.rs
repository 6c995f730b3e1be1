use chrono::Utc;
use tracing::{info, instrument};

use library_core::traits::LoanQuery;
use library_core::{DomainError, Loan};

use super::{non_blank, BooksAdministration};
use crate::dto::{
    BorrowBookRequest, BorrowFeeResponse, IssuedBooksRequest, LoanResponse, ReturnBookRequest,
};
use crate::services::error::{parse_id, ServiceError, ServiceResult};
use crate::services::ledger::RequestContext;

impl BooksAdministration<'_> {
    /// Issue a book to a member
    #[instrument(skip(self, rc, req), fields(book_id = %req.book_id, member_id = %req.member_id))]
    pub async fn borrow_book(
        &self,
        rc: &RequestContext,
        req: BorrowBookRequest,
    ) -> ServiceResult<LoanResponse> {
        let tx = self.ledger().open("BorrowBook", rc).await?;
        let result = self.issue_loan(req).await;
        tx.settle(result, "Book issued successfully").await
    }

    async fn issue_loan(&self, req: BorrowBookRequest) -> ServiceResult<LoanResponse> {
        let book_id = parse_id(&req.book_id, "book", false)?;
        let member_id = parse_id(&req.member_id, "member", false)?;
        let schedule = self.ctx.fee_schedule();
        let days = schedule.resolve_duration(req.borrow_duration).ok_or_else(|| {
            ServiceError::validation(format!(
                "borrow_duration must be between 1 and {} days",
                schedule.max_borrow_days
            ))
        })?;

        let member = self
            .ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member"))?;
        if !member.can_borrow() {
            return Err(DomainError::MemberNotActive.into());
        }

        let book = self.load_book(book_id).await?;
        if !book.is_lendable() {
            return Err(DomainError::BookUnavailable.into());
        }
        if self.ctx.loan_repo().has_open_loan(book.id).await? {
            return Err(DomainError::BookOnLoan.into());
        }

        let loan = Loan::issue(book.id, member.id, days);
        // a concurrent borrow of the same book surfaces here as BookOnLoan
        self.ctx
            .loan_repo()
            .create(&loan)
            .await
            .map_err(ServiceError::save_failed)?;

        info!(loan_id = %loan.id, due = %loan.return_date, "Book issued");
        Ok(LoanResponse::from_loan(&loan, &schedule))
    }

    /// Close the open loan of a book by a member and charge any overdue fee
    #[instrument(skip(self, rc, req), fields(book_id = %req.book_id, member_id = %req.member_id))]
    pub async fn return_book(
        &self,
        rc: &RequestContext,
        req: ReturnBookRequest,
    ) -> ServiceResult<LoanResponse> {
        let tx = self.ledger().open("ReturnBook", rc).await?;
        let result = self.close_loan(req).await;
        tx.settle(result, "Book returned successfully").await
    }

    async fn close_loan(&self, req: ReturnBookRequest) -> ServiceResult<LoanResponse> {
        let book_id = parse_id(&req.book_id, "book", false)?;
        let member_id = parse_id(&req.member_id, "member", false)?;
        let loans = self.ctx.loan_repo();

        let mut loan = match loans.find_open(book_id, member_id).await? {
            Some(loan) => loan,
            None => {
                return Err(match loans.find_latest(book_id, member_id).await? {
                    Some(_) => DomainError::AlreadyReturned.into(),
                    None => DomainError::LoanNotFound.into(),
                });
            }
        };

        let schedule = self.ctx.fee_schedule();
        let fee = loan.mark_returned(&schedule, Utc::now(), req.fee_paid.unwrap_or(false))?;
        loans
            .update(&loan)
            .await
            .map_err(ServiceError::save_failed)?;

        info!(loan_id = %loan.id, %fee, fee_paid = loan.fee_paid, "Book returned");
        Ok(LoanResponse::from_loan(&loan, &schedule))
    }

    /// Loans, newest first, optionally filtered
    #[instrument(skip(self))]
    pub async fn issued_books(&self, req: IssuedBooksRequest) -> ServiceResult<Vec<LoanResponse>> {
        let member_id = match non_blank(req.member_id) {
            Some(raw) => Some(parse_id(&raw, "member", true)?),
            None => None,
        };
        let book_id = match non_blank(req.book_id) {
            Some(raw) => Some(parse_id(&raw, "book", true)?),
            None => None,
        };

        let now = Utc::now();
        let only_overdue = req.overdue == Some(true);
        let query = LoanQuery {
            member_id,
            book_id,
            returned: if only_overdue { Some(false) } else { req.returned },
            overdue_at: only_overdue.then_some(now),
        };

        let mut loans = self.ctx.loan_repo().list(query).await?;
        if req.overdue == Some(false) {
            loans.retain(|loan| !loan.is_overdue(now));
        }

        let schedule = self.ctx.fee_schedule();
        Ok(loans
            .iter()
            .map(|loan| LoanResponse::from_loan(loan, &schedule))
            .collect())
    }

    /// Current borrowing terms
    pub fn borrow_fee_lookup(&self) -> BorrowFeeResponse {
        BorrowFeeResponse::from(&self.ctx.fee_schedule())
    }
}
