//! 购物车与分类的响应式上下文

use crate::api::ApiContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use storefront::models::{Category, Product};
use storefront::{CartStore, CategoryStore};

/// 购物车上下文
///
/// 购物车只存在于内存中，刷新页面后清空。
#[derive(Clone, Copy)]
pub struct CartContext {
    pub cart: RwSignal<CartStore>,
}

impl CartContext {
    pub fn new() -> Self {
        Self {
            cart: RwSignal::new(CartStore::new()),
        }
    }

    pub fn add(&self, product: &Product, quantity: i64) {
        self.cart.update(|c| c.add_product(product, quantity));
    }

    pub fn item_count(&self) -> Signal<i64> {
        let cart = self.cart;
        Signal::derive(move || cart.with(|c| c.item_count()))
    }
}

pub fn use_cart() -> CartContext {
    use_context::<CartContext>().expect("CartContext should be provided")
}

/// 分类上下文
#[derive(Clone, Copy)]
pub struct CategoryContext {
    pub categories: ReadSignal<Vec<Category>>,
    set_categories: WriteSignal<Vec<Category>>,
    pub is_loading: ReadSignal<bool>,
    set_loading: WriteSignal<bool>,
    store: StoredValue<Rc<CategoryStore>, LocalStorage>,
}

impl CategoryContext {
    pub fn new() -> Self {
        let (categories, set_categories) = signal(Vec::new());
        let (is_loading, set_loading) = signal(false);
        Self {
            categories,
            set_categories,
            is_loading,
            set_loading,
            store: StoredValue::new_local(Rc::new(CategoryStore::new())),
        }
    }

    /// 拉取分类；已有缓存时不会再次请求
    pub fn fetch(&self, api: ApiContext) {
        let ctx = *self;
        let store = self.store.get_value();
        if store.is_populated() || store.is_loading() {
            return;
        }

        ctx.set_loading.set(true);
        let api = api.get();
        spawn_local(async move {
            store.fetch_categories(api.as_ref()).await;
            ctx.set_categories.set(store.categories());
            ctx.set_loading.set(store.is_loading());
        });
    }

    pub fn name_of(&self, id: i64) -> Option<String> {
        self.categories
            .with(|list| list.iter().find(|c| c.id == id).map(|c| c.name.clone()))
    }
}

pub fn use_categories() -> CategoryContext {
    use_context::<CategoryContext>().expect("CategoryContext should be provided")
}
