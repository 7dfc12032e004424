use crate::application::checkout::CheckoutSignal;
use crate::domain::cart::{Cart, CartItem, OrderTotal};
use crate::domain::post::{LikedPosts, Post, PostId, demo_posts};
use crate::error::{CheckoutError, Result};

/// The screens reachable from the navigation chrome, plus checkout.
/// `Payment` is entered only through `AppContext::begin_checkout`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Screen {
    Feed,
    Search,
    Cart,
    Profile,
    Payment,
}

/// Size/color/quantity selection for a product being configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    post: PostId,
    size: Option<String>,
    color: Option<String>,
    quantity: u32,
}

impl ProductDraft {
    fn new(post: PostId) -> Self {
        Self {
            post,
            size: None,
            color: None,
            quantity: 1,
        }
    }

    pub fn post(&self) -> PostId {
        self.post
    }

    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn choose_size(&mut self, size: impl Into<String>) {
        self.size = Some(size.into());
    }

    pub fn choose_color(&mut self, color: impl Into<String>) {
        self.color = Some(color.into());
    }

    pub fn increment_quantity(&mut self) {
        self.quantity += 1;
    }

    /// Quantity never drops below one.
    pub fn decrement_quantity(&mut self) {
        self.quantity = self.quantity.saturating_sub(1).max(1);
    }

    pub fn can_add_to_cart(&self) -> bool {
        self.size.is_some() && self.color.is_some()
    }
}

/// Explicit application FSM: which screen is showing, the cart, the liked
/// set and the product modal, all owned here instead of being spread over
/// ambient view state. Transitions are synchronous and unit-testable
/// without any view tree.
pub struct AppContext {
    screen: Screen,
    posts: Vec<Post>,
    liked: LikedPosts,
    cart: Cart,
    product_draft: Option<ProductDraft>,
    order_success: bool,
}

impl AppContext {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            screen: Screen::Feed,
            posts,
            liked: LikedPosts::default(),
            cart: Cart::new(),
            product_draft: None,
            order_success: false,
        }
    }

    /// The mock storefront: demo feed, one post pre-liked.
    pub fn demo() -> Self {
        let mut ctx = Self::new(demo_posts());
        ctx.liked = LikedPosts::new([PostId(2)]);
        ctx
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn liked(&self) -> &LikedPosts {
        &self.liked
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn product_draft(&self) -> Option<&ProductDraft> {
        self.product_draft.as_ref()
    }

    pub fn product_draft_mut(&mut self) -> Option<&mut ProductDraft> {
        self.product_draft.as_mut()
    }

    pub fn order_success(&self) -> bool {
        self.order_success
    }

    /// Moves between chrome screens. Checkout is not navigable directly;
    /// asking for it is ignored.
    pub fn navigate(&mut self, screen: Screen) {
        if screen == Screen::Payment {
            tracing::warn!("checkout is entered via begin_checkout, not navigation");
            return;
        }
        tracing::debug!(?screen, "navigated");
        self.screen = screen;
    }

    /// Flips the liked state of a post; returns the new state.
    pub fn toggle_like(&mut self, post: PostId) -> bool {
        self.liked.toggle(post)
    }

    /// Opens the product modal for a feed post.
    pub fn open_product(&mut self, id: PostId) -> Result<()> {
        if self.post(id).is_none() {
            return Err(CheckoutError::UnknownPost(id.0));
        }
        self.product_draft = Some(ProductDraft::new(id));
        Ok(())
    }

    pub fn close_product(&mut self) {
        self.product_draft = None;
    }

    /// Adds the configured product to the cart and closes the modal.
    pub fn add_to_cart(&mut self) -> Result<()> {
        let draft = self
            .product_draft
            .as_ref()
            .filter(|d| d.can_add_to_cart())
            .ok_or(CheckoutError::IncompleteSelection)?;
        let post = self
            .post(draft.post)
            .ok_or(CheckoutError::UnknownPost(draft.post.0))?;

        let item = CartItem {
            post: post.id,
            seller: post.seller.clone(),
            price: post.price,
            size: draft.size().unwrap_or_default().to_string(),
            color: draft.color().unwrap_or_default().to_string(),
            quantity: draft.quantity(),
        };
        tracing::debug!(post = %item.post, quantity = item.quantity, "added to cart");
        self.cart.add(item);
        self.product_draft = None;
        Ok(())
    }

    pub fn remove_from_cart(&mut self, index: usize) -> Option<CartItem> {
        self.cart.remove(index)
    }

    /// Enters checkout and yields the total to mount a `CheckoutSelector`
    /// with. Rejected for an empty cart.
    pub fn begin_checkout(&mut self) -> Result<OrderTotal> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.screen = Screen::Payment;
        let total = self.cart.order_total();
        tracing::info!(total = %total, items = self.cart.len(), "checkout started");
        Ok(total)
    }

    /// Applies an outbound checkout signal: cancellation returns to the
    /// cart; success clears it, returns to the feed and raises the order
    /// confirmation.
    pub fn handle_checkout_signal(&mut self, signal: CheckoutSignal) {
        match signal {
            CheckoutSignal::Back => {
                self.screen = Screen::Cart;
            }
            CheckoutSignal::PaymentSucceeded => {
                tracing::info!(items = self.cart.len(), "order settled");
                self.cart.clear();
                self.screen = Screen::Feed;
                self.order_success = true;
            }
        }
    }

    pub fn dismiss_order_success(&mut self) {
        self.order_success = false;
    }
}
