//! Pure business rules: access predicates and leave, attendance and
//! settlement arithmetic. Nothing here touches the database.

pub mod finance_permissions;
pub mod kst;
pub mod leave_calc;
pub mod permissions;
pub mod settlement;
pub mod work_time;

#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod tests_finance_permissions;
#[cfg(test)]
mod tests_leave_calc;
#[cfg(test)]
mod tests_permissions;
#[cfg(test)]
mod tests_props_calculators;
#[cfg(test)]
mod tests_settlement;
#[cfg(test)]
mod tests_work_time;
