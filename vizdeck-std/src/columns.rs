//! Column configuration for the fund-analysis spreadsheet
//!
//! Raw headers as they appear in the source table, with the short
//! aliases used for axis ticks and labels.

pub const PRODUCT_NAME: &str = "产品名称";

/// Factor columns used by the correlation charts: (raw header, alias).
pub const FACTOR_COLUMNS: &[(&str, &str)] = &[
    ("最近一年（含2025年）的年化", "近1Y年化"),
    ("过去3年平均年化", "3Y平均年化"),
    ("过去3年累计回报", "3Y累计回报"),
    ("2024年年化", "2024年年化"),
    ("2023年年化", "2023年年化"),
    ("2022年年化", "2022年年化"),
    ("2021年年化", "2021年年化"),
    ("2020年年化", "2020年年化"),
    ("基金标准差", "基金标准差"),
    ("投资组合预期年化报酬率", "组合预期年化"),
    ("年化无风险利率（平均回报减去预期年化的绝对值）", "无风险年化"),
    ("夏普比率", "夏普比率"),
    ("最大回撤", "最大回撤"),
    ("卡玛比率", "卡玛比率"),
];

/// The eight key factors the similarity network is built on.
pub const NETWORK_COLUMNS: &[&str] = &[
    "最近一年（含2025年）的年化",
    "过去3年平均年化",
    "过去3年累计回报",
    "基金标准差",
    "夏普比率",
    "最大回撤",
    "2024年年化",
    "投资组合预期年化报酬率",
];

/// Scatter inputs: latest-year return, 3-year average, dispersion and
/// the Sharpe ratio driving point color.
pub const LATEST_RETURN: &str = "最近一年（含2025年）的年化";
pub const AVG_RETURN_3Y: &str = "过去3年平均年化";
pub const STD_DEV: &str = "基金标准差";
pub const SHARPE: &str = "夏普比率";
