mod component;
mod input;
mod response;
mod year_config;

pub use component::{
    CreditedComponent, DetailTotals, FreelanceFigures, GeneralIncomeComponent, IncomeCategory,
    PayrollFigures, SettledComponent, TaxedComponent,
};
pub use input::{
    AgeBand, AgriculturalInput, CalculationInput, DeductionsInput, DemographicsInput,
    EmploymentInput, FreelanceInput, InvestmentInput, ObligationsInput, OtherIncomeInput,
    PensionInput, PresumptiveAdjustment, RentalInput, TradeFeeLocation,
};
pub use response::{
    CalculationResponse, DeductionBreakdownEntry, DetailRow, InvestmentBreakdownEntry, Meta,
    Summary,
};
pub use year_config::{
    ContributionRules, CreditTable, DeductionRules, EfkaCategory, HouseholdRate, InputLimits,
    InvestmentCategory, InvestmentCategoryRate, PayrollRules, RateSchedule, TaxBracket,
    TradeFeeRules, TradeFeeSunset, YearConfiguration, YouthCategory, YouthRates,
};
