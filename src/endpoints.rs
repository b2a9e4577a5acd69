//! The API endpoint URIs.

/// The root route which reports that the API is up.
pub const ROOT: &str = "/";
/// The route for registering a new user.
pub const REGISTER: &str = "/register";
/// The route for exchanging credentials for an access token.
pub const TOKEN: &str = "/token";
/// The route for fetching the authenticated user's profile.
pub const USERS_ME: &str = "/users/me";
/// The route for listing and creating categories.
pub const CATEGORIES: &str = "/categories/";
/// The route for deleting a category.
pub const CATEGORY: &str = "/categories/{category_id}";
/// The route for listing and creating transactions.
pub const TRANSACTIONS: &str = "/transactions/";
/// The route for listing and creating bills.
pub const BILLS: &str = "/bills/";
/// The route for marking a bill as paid.
pub const PAY_BILL: &str = "/bills/{bill_id}/pay";
/// The route for listing and creating loans.
pub const LOANS: &str = "/loans/";
/// The route for deleting a loan.
pub const LOAN: &str = "/loans/{loan_id}";
/// The route for applying an extra payment to a loan.
pub const EXTRA_PAYMENT: &str = "/loans/{loan_id}/extra-payment";
/// The route for the financial summary.
pub const SUMMARY: &str = "/analytics/summary";
/// The route for the monthly income/expense trend.
pub const MONTHLY_TREND: &str = "/analytics/monthly-trend";
