//! Checkout submission flow.
//!
//! [`CheckoutFlow`] runs order submission as a single client-side
//! transaction against the cart: one snapshot feeds both the order lines
//! and the totals, success clears the cart, and failure leaves it
//! untouched for retry. The state machine is
//! `Idle -> Submitting -> {Succeeded, Failed}`; terminal states are
//! re-entered through `Submitting` on the next submission, so the flow is
//! not one-shot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use fieldhouse_core::CheckoutState;
use fieldhouse_core::types::price;

use crate::backend::types::{OrderConfirmation, OrderCustomer, OrderItem, OrderPayload};
use crate::backend::{CheckoutError, OrderGateway};
use crate::cart::{CartLine, CartStore};

#[derive(Debug, Default)]
struct FlowState {
    state: CheckoutState,
    message: Option<String>,
}

/// Orchestrates order submission against the Order Service.
pub struct CheckoutFlow {
    orders: Arc<dyn OrderGateway>,
    state: Mutex<FlowState>,
}

impl CheckoutFlow {
    /// Create a checkout flow over an Order Service.
    #[must_use]
    pub fn new(orders: Arc<dyn OrderGateway>) -> Self {
        Self {
            orders,
            state: Mutex::new(FlowState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current submission state.
    #[must_use]
    pub fn state(&self) -> CheckoutState {
        self.lock().state
    }

    /// Latest user-visible outcome message, if any.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.lock().message.clone()
    }

    /// Whether a submission may be started.
    ///
    /// A UI uses this to render the checkout control as disabled when the
    /// cart is empty or a submission is in flight.
    #[must_use]
    pub fn can_submit(&self, cart: &CartStore) -> bool {
        !cart.is_empty() && self.state() != CheckoutState::Submitting
    }

    /// Submit the cart as an order.
    ///
    /// The cart is snapshotted once; the order lines and the
    /// subtotal/shipping/total all come from that same snapshot. On
    /// success the flow reaches `Succeeded`, the cart is cleared, and a
    /// confirmation message is set. On failure the flow reaches `Failed`,
    /// the cart is left untouched for retry, and the message becomes
    /// `Checkout failed: <detail>` using the service's structured detail
    /// when present.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] or
    /// [`CheckoutError::SubmissionInFlight`] without contacting the Order
    /// Service or changing any state (the inert, disabled-control
    /// boundary), and any Order Service error otherwise.
    #[instrument(skip(self, cart))]
    pub async fn submit(&self, cart: &CartStore) -> Result<OrderConfirmation, CheckoutError> {
        {
            let mut flow = self.lock();
            if flow.state == CheckoutState::Submitting {
                return Err(CheckoutError::SubmissionInFlight);
            }
            if cart.is_empty() {
                return Err(CheckoutError::EmptyCart);
            }
            flow.state = CheckoutState::Submitting;
            flow.message = None;
        }

        let payload = build_payload(&cart.lines());

        match self.orders.submit_order(&payload).await {
            Ok(confirmation) => {
                cart.clear();
                let mut flow = self.lock();
                flow.state = CheckoutState::Succeeded;
                flow.message = Some(success_message(&confirmation));
                info!(order_id = ?confirmation.id, "order confirmed");
                Ok(confirmation)
            }
            Err(err) => {
                let mut flow = self.lock();
                flow.state = CheckoutState::Failed;
                flow.message = Some(format!("Checkout failed: {}", err.user_detail()));
                warn!(error = %err, "order submission failed");
                Err(err)
            }
        }
    }
}

/// Build the order payload from one cart snapshot.
fn build_payload(lines: &[CartLine]) -> OrderPayload {
    let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();
    let shipping = price::shipping_for(subtotal);
    OrderPayload {
        items: lines
            .iter()
            .map(|line| OrderItem {
                product_id: line.id,
                quantity: line.qty,
            })
            .collect(),
        customer: OrderCustomer::placeholder(),
        subtotal,
        shipping,
        total: subtotal + shipping,
    }
}

fn success_message(confirmation: &OrderConfirmation) -> String {
    match confirmation.id {
        Some(id) => format!("Order #{id} placed. Thank you!"),
        None => "Order placed. Thank you!".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;
    use tokio::sync::{Mutex as AsyncMutex, oneshot};

    use fieldhouse_core::{OrderId, ProductId};

    use crate::backend::types::Product;

    fn product(id: i64, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Decimal::new(price_cents, 2),
            description: String::new(),
            image: None,
            category: "Equipment".to_string(),
            sport: "Soccer".to_string(),
            brand: None,
        }
    }

    /// Gateway answering from a queue of scripted results, recording every
    /// payload it receives.
    struct ScriptedGateway {
        results: StdMutex<VecDeque<Result<OrderConfirmation, CheckoutError>>>,
        payloads: StdMutex<Vec<OrderPayload>>,
    }

    impl ScriptedGateway {
        fn new(
            results: impl IntoIterator<Item = Result<OrderConfirmation, CheckoutError>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                results: StdMutex::new(results.into_iter().collect()),
                payloads: StdMutex::new(Vec::new()),
            })
        }

        fn confirming(order_id: i64) -> Arc<Self> {
            Self::new([Ok(OrderConfirmation {
                id: Some(OrderId::new(order_id)),
            })])
        }

        fn rejecting(status: reqwest::StatusCode, detail: Option<&str>) -> Arc<Self> {
            Self::new([Err(CheckoutError::Rejected {
                status,
                detail: detail.map(String::from),
            })])
        }

        fn payloads(&self) -> Vec<OrderPayload> {
            self.payloads.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OrderGateway for ScriptedGateway {
        async fn submit_order(
            &self,
            payload: &OrderPayload,
        ) -> Result<OrderConfirmation, CheckoutError> {
            self.payloads.lock().unwrap().push(payload.clone());
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted result left")
        }
    }

    #[tokio::test]
    async fn test_empty_cart_is_inert() {
        let gateway = ScriptedGateway::confirming(1);
        let flow = CheckoutFlow::new(gateway.clone());
        let cart = CartStore::new();

        assert!(!flow.can_submit(&cart));
        let result = flow.submit(&cart).await;
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));

        // No submission occurred and nothing changed.
        assert!(gateway.payloads().is_empty());
        assert_eq!(flow.state(), CheckoutState::Idle);
        assert_eq!(flow.message(), None);
    }

    #[tokio::test]
    async fn test_success_clears_cart_and_sets_message() {
        let gateway = ScriptedGateway::confirming(41);
        let flow = CheckoutFlow::new(gateway);
        let cart = CartStore::new();
        cart.add(&product(1, 49_99));

        let confirmation = flow.submit(&cart).await.unwrap();
        assert_eq!(confirmation.id, Some(OrderId::new(41)));
        assert!(cart.is_empty());
        assert_eq!(flow.state(), CheckoutState::Succeeded);
        assert_eq!(
            flow.message().unwrap(),
            "Order #41 placed. Thank you!"
        );
    }

    #[tokio::test]
    async fn test_failure_preserves_cart_and_formats_detail() {
        let gateway =
            ScriptedGateway::rejecting(reqwest::StatusCode::BAD_REQUEST, Some("out of stock"));
        let flow = CheckoutFlow::new(gateway);
        let cart = CartStore::new();
        cart.add(&product(1, 49_99));
        let before = cart.lines();

        let result = flow.submit(&cart).await;
        assert!(result.is_err());
        assert_eq!(cart.lines(), before);
        assert_eq!(flow.state(), CheckoutState::Failed);
        assert_eq!(flow.message().unwrap(), "Checkout failed: out of stock");
    }

    #[tokio::test]
    async fn test_failure_without_detail_uses_status_description() {
        let gateway = ScriptedGateway::rejecting(reqwest::StatusCode::INTERNAL_SERVER_ERROR, None);
        let flow = CheckoutFlow::new(gateway);
        let cart = CartStore::new();
        cart.add(&product(1, 10_00));

        let _ = flow.submit(&cart).await;
        assert_eq!(
            flow.message().unwrap(),
            "Checkout failed: Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_failed_flow_is_retryable() {
        let gateway = ScriptedGateway::new([
            Err(CheckoutError::Rejected {
                status: reqwest::StatusCode::BAD_REQUEST,
                detail: Some("out of stock".to_string()),
            }),
            Ok(OrderConfirmation {
                id: Some(OrderId::new(7)),
            }),
        ]);
        let flow = CheckoutFlow::new(gateway.clone());
        let cart = CartStore::new();
        cart.add(&product(1, 25_00));

        assert!(flow.submit(&cart).await.is_err());
        assert_eq!(flow.state(), CheckoutState::Failed);

        // The cart survived the failure, so the retry submits the same line.
        flow.submit(&cart).await.unwrap();
        assert_eq!(flow.state(), CheckoutState::Succeeded);
        assert!(cart.is_empty());
        assert_eq!(gateway.payloads().len(), 2);
        assert_eq!(gateway.payloads().first().unwrap().items, gateway.payloads().get(1).unwrap().items);
    }

    #[tokio::test]
    async fn test_payload_totals_come_from_one_snapshot() {
        let gateway = ScriptedGateway::confirming(1);
        let flow = CheckoutFlow::new(gateway.clone());
        let cart = CartStore::new();
        let shoe = product(1, 49_99);
        cart.add(&shoe);
        cart.add(&shoe);
        cart.add(&product(2, 10_00));

        flow.submit(&cart).await.unwrap();

        let payloads = gateway.payloads();
        let payload = payloads.first().unwrap();
        assert_eq!(
            payload.items,
            vec![
                OrderItem {
                    product_id: ProductId::new(1),
                    quantity: 2
                },
                OrderItem {
                    product_id: ProductId::new(2),
                    quantity: 1
                },
            ]
        );
        assert_eq!(payload.subtotal, Decimal::new(109_98, 2));
        assert_eq!(payload.shipping, Decimal::ZERO);
        assert_eq!(payload.total, Decimal::new(109_98, 2));
        assert_eq!(payload.customer, OrderCustomer::placeholder());
    }

    #[tokio::test]
    async fn test_shipping_charged_below_threshold_in_payload() {
        let gateway = ScriptedGateway::confirming(1);
        let flow = CheckoutFlow::new(gateway.clone());
        let cart = CartStore::new();
        cart.add(&product(1, 100_00));

        flow.submit(&cart).await.unwrap();

        let payloads = gateway.payloads();
        let payload = payloads.first().unwrap();
        assert_eq!(payload.shipping, Decimal::new(9_99, 2));
        assert_eq!(payload.total, Decimal::new(109_99, 2));
    }

    /// Gateway that parks the first submission on a oneshot gate.
    struct GatedGateway {
        gate: AsyncMutex<Option<oneshot::Receiver<Result<OrderConfirmation, CheckoutError>>>>,
    }

    #[async_trait]
    impl OrderGateway for GatedGateway {
        async fn submit_order(
            &self,
            _payload: &OrderPayload,
        ) -> Result<OrderConfirmation, CheckoutError> {
            let gate = self
                .gate
                .lock()
                .await
                .take()
                .expect("gateway called more than once");
            gate.await.expect("gate sender dropped")
        }
    }

    #[tokio::test]
    async fn test_in_flight_submission_makes_second_inert() {
        let (release, gate) = oneshot::channel();
        let gateway = Arc::new(GatedGateway {
            gate: AsyncMutex::new(Some(gate)),
        });
        let flow = Arc::new(CheckoutFlow::new(gateway));
        let cart = Arc::new(CartStore::new());
        cart.add(&product(1, 20_00));

        let first = tokio::spawn({
            let flow = Arc::clone(&flow);
            let cart = Arc::clone(&cart);
            async move { flow.submit(&cart).await }
        });
        tokio::task::yield_now().await;
        assert_eq!(flow.state(), CheckoutState::Submitting);

        // Second click while the first is in flight: inert, nothing sent.
        let second = flow.submit(&cart).await;
        assert!(matches!(second, Err(CheckoutError::SubmissionInFlight)));

        release
            .send(Ok(OrderConfirmation {
                id: Some(OrderId::new(9)),
            }))
            .unwrap();
        first.await.unwrap().unwrap();
        assert_eq!(flow.state(), CheckoutState::Succeeded);
    }
}
