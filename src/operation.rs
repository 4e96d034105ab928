//! The catalogue of supported API operations.
//!
//! Each [`Operation`] has one row in a static table describing which service
//! it belongs to, which top-level parameters must be present, and which
//! session preconditions and response checks apply.

use crate::endpoint::Service;
use crate::error::BetfairError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListCompetitions,
    ListCountries,
    ListCurrentOrders,
    ListClearedOrders,
    ListEvents,
    ListEventTypes,
    ListMarketBook,
    ListRunnerBook,
    ListMarketCatalogue,
    ListMarketProfitAndLoss,
    ListMarketTypes,
    ListTimeRanges,
    ListVenues,
    PlaceOrders,
    CancelOrders,
    ReplaceOrders,
    UpdateOrders,
    CreateDeveloperAppKeys,
    GetDeveloperAppKeys,
    GetAccountDetails,
    GetAccountFunds,
    GetAccountStatement,
    ListCurrencyRates,
    Heartbeat,
    ListRaceDetails,
    NavigationMenu,
}

/// A top-level parameter that must be present, and the error raised without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    pub operation: Operation,
    pub name: &'static str,
    pub service: Service,
    pub required: &'static [Requirement],
    pub requires_app_key: bool,
    /// The decoded body carries a business `status` that must be `SUCCESS`.
    pub checks_status: bool,
}

const FILTER: Requirement = Requirement {
    field: "filter",
    message: "Market Filter is Required",
};
const MARKET_IDS: Requirement = Requirement {
    field: "marketIds",
    message: "Market IDs are Required",
};
const MARKET_ID: Requirement = Requirement {
    field: "marketId",
    message: "Market ID is Required",
};
const INSTRUCTIONS: Requirement = Requirement {
    field: "instructions",
    message: "Order Instructions are Required",
};

const NONE: &[Requirement] = &[];
const MARKET_FILTER: &[Requirement] = &[FILTER];
const ORDER_INSTRUCTIONS: &[Requirement] = &[MARKET_ID, INSTRUCTIONS];

const fn betting(
    operation: Operation,
    name: &'static str,
    required: &'static [Requirement],
) -> OperationSpec {
    OperationSpec {
        operation,
        name,
        service: Service::Betting,
        required,
        requires_app_key: true,
        checks_status: false,
    }
}

const fn account(
    operation: Operation,
    name: &'static str,
    required: &'static [Requirement],
) -> OperationSpec {
    OperationSpec {
        operation,
        name,
        service: Service::Account,
        required,
        requires_app_key: true,
        checks_status: false,
    }
}

const fn order_mutation(operation: Operation, name: &'static str) -> OperationSpec {
    OperationSpec {
        checks_status: true,
        ..betting(operation, name, ORDER_INSTRUCTIONS)
    }
}

const fn developer_keys(
    operation: Operation,
    name: &'static str,
    required: &'static [Requirement],
) -> OperationSpec {
    OperationSpec {
        requires_app_key: false,
        ..account(operation, name, required)
    }
}

const fn on_service(spec: OperationSpec, service: Service) -> OperationSpec {
    OperationSpec { service, ..spec }
}

/// Indexed by `Operation as usize`; order must follow the enum declaration.
static OPERATIONS: [OperationSpec; 26] = [
    betting(Operation::ListCompetitions, "listCompetitions", MARKET_FILTER),
    betting(Operation::ListCountries, "listCountries", MARKET_FILTER),
    betting(Operation::ListCurrentOrders, "listCurrentOrders", NONE),
    betting(
        Operation::ListClearedOrders,
        "listClearedOrders",
        &[Requirement {
            field: "betStatus",
            message: "Bet Status is Required",
        }],
    ),
    betting(Operation::ListEvents, "listEvents", MARKET_FILTER),
    betting(Operation::ListEventTypes, "listEventTypes", MARKET_FILTER),
    betting(Operation::ListMarketBook, "listMarketBook", &[MARKET_IDS]),
    betting(
        Operation::ListRunnerBook,
        "listRunnerBook",
        &[
            MARKET_ID,
            Requirement {
                field: "selectionId",
                message: "Selection ID is Required",
            },
        ],
    ),
    betting(
        Operation::ListMarketCatalogue,
        "listMarketCatalogue",
        &[
            FILTER,
            Requirement {
                field: "maxResults",
                message: "Max Results is Required",
            },
        ],
    ),
    betting(
        Operation::ListMarketProfitAndLoss,
        "listMarketProfitAndLoss",
        &[MARKET_IDS],
    ),
    betting(Operation::ListMarketTypes, "listMarketTypes", MARKET_FILTER),
    betting(
        Operation::ListTimeRanges,
        "listTimeRanges",
        &[
            FILTER,
            Requirement {
                field: "granularity",
                message: "Time Granularity is Required",
            },
        ],
    ),
    betting(Operation::ListVenues, "listVenues", MARKET_FILTER),
    order_mutation(Operation::PlaceOrders, "placeOrders"),
    betting(Operation::CancelOrders, "cancelOrders", NONE),
    order_mutation(Operation::ReplaceOrders, "replaceOrders"),
    order_mutation(Operation::UpdateOrders, "updateOrders"),
    developer_keys(
        Operation::CreateDeveloperAppKeys,
        "createDeveloperAppKeys",
        &[Requirement {
            field: "appName",
            message: "App Name is Required",
        }],
    ),
    developer_keys(Operation::GetDeveloperAppKeys, "getDeveloperAppKeys", NONE),
    account(Operation::GetAccountDetails, "getAccountDetails", NONE),
    account(Operation::GetAccountFunds, "getAccountFunds", NONE),
    account(Operation::GetAccountStatement, "getAccountStatement", NONE),
    account(Operation::ListCurrencyRates, "listCurrencyRates", NONE),
    on_service(
        betting(
            Operation::Heartbeat,
            "heartbeat",
            &[Requirement {
                field: "preferredTimeoutSeconds",
                message: "Preferred Timeout is Required",
            }],
        ),
        Service::Heartbeat,
    ),
    on_service(
        betting(Operation::ListRaceDetails, "listRaceDetails", NONE),
        Service::RaceStatus,
    ),
    on_service(
        betting(Operation::NavigationMenu, "navigationMenu", NONE),
        Service::Navigation,
    ),
];

impl Operation {
    pub const ALL: [Operation; 26] = [
        Operation::ListCompetitions,
        Operation::ListCountries,
        Operation::ListCurrentOrders,
        Operation::ListClearedOrders,
        Operation::ListEvents,
        Operation::ListEventTypes,
        Operation::ListMarketBook,
        Operation::ListRunnerBook,
        Operation::ListMarketCatalogue,
        Operation::ListMarketProfitAndLoss,
        Operation::ListMarketTypes,
        Operation::ListTimeRanges,
        Operation::ListVenues,
        Operation::PlaceOrders,
        Operation::CancelOrders,
        Operation::ReplaceOrders,
        Operation::UpdateOrders,
        Operation::CreateDeveloperAppKeys,
        Operation::GetDeveloperAppKeys,
        Operation::GetAccountDetails,
        Operation::GetAccountFunds,
        Operation::GetAccountStatement,
        Operation::ListCurrencyRates,
        Operation::Heartbeat,
        Operation::ListRaceDetails,
        Operation::NavigationMenu,
    ];

    pub fn spec(self) -> &'static OperationSpec {
        &OPERATIONS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = BetfairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| BetfairError::Validation(format!("Unknown operation: {s}")))
    }
}
