//! Data transfer objects for API boundaries.

mod objective_dto;
mod order_dto;

pub use objective_dto::{
    CategoryProgressDto, CreateObjectiveRequest, FleetProgressDto, ObjectiveDto,
    ObjectivesByYearDto, RepProgressDto, UpdateObjectiveRequest,
};
pub use order_dto::{
    ClientSummaryDto, ContactDto, CreateOrderRequest, HistoryEntryDto, LineQuantityUpdate,
    ModifiedOrderDto, NewLineRequest, OrderDto, OrderLineDto, OrderSummaryDto,
    PromotionSummaryDto, UpdateOrderRequest,
};
