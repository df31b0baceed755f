use crate::api::use_api;
use crate::components::layout::use_notifier;
use crate::web::router::use_router;
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront::AppRoute;
use storefront::models::{ImageUpload, NewProduct, ProductId, ProductUpdate};
use wasm_bindgen_futures::JsFuture;

/// 读取文件输入框中选择的第一个文件
async fn read_selected_file(input: Option<web_sys::HtmlInputElement>) -> Option<ImageUpload> {
    let file = input?.files()?.get(0)?;
    let buffer = JsFuture::from(file.array_buffer()).await.ok()?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Some(ImageUpload {
        file_name: file.name(),
        content_type,
        bytes,
    })
}

/// 商品表单的字段
#[derive(Clone, Default)]
struct FormState {
    name: String,
    price: String,
    description: String,
}

impl FormState {
    /// 校验并返回解析后的价格
    fn validate(&self) -> Result<f64, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        match self.price.trim().parse::<f64>() {
            Ok(price) if price > 0.0 => Ok(price),
            _ => Err("Price must be a positive number".to_string()),
        }
    }

    fn description(&self) -> Option<String> {
        Some(self.description.trim().to_string()).filter(|d| !d.is_empty())
    }
}

/// 创建/编辑商品页
///
/// `id` 为空时创建新商品，否则加载并编辑已有商品。
#[component]
pub fn ProductFormPage(#[prop(optional)] id: Option<ProductId>) -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let notifier = use_notifier();

    let form = RwSignal::new(FormState::default());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let file_input = NodeRef::<Input>::new();

    // 编辑时预填已有内容
    if let Some(id) = id {
        let api = api.get();
        spawn_local(async move {
            match api.get_product(id).await {
                Ok(p) => form.set(FormState {
                    name: p.name,
                    price: p.price.to_string(),
                    description: p.description.unwrap_or_default(),
                }),
                Err(e) => notifier.error(format!("Failed to load product: {}", e)),
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let state = form.get();
        let price = match state.validate() {
            Ok(price) => price,
            Err(msg) => {
                set_error_msg.set(Some(msg));
                return;
            }
        };

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.get();
        let input = file_input.get();
        spawn_local(async move {
            let image = read_selected_file(input).await;
            let result = match id {
                None => {
                    let mut product = NewProduct::new(state.name.trim(), price);
                    if let Some(description) = state.description() {
                        product = product.with_description(description);
                    }
                    if let Some(image) = image {
                        product = product.with_image(image);
                    }
                    api.create_product(&product).await
                }
                Some(id) => {
                    let update = ProductUpdate {
                        name: Some(state.name.trim().to_string()),
                        price: Some(price),
                        description: Some(state.description.trim().to_string()),
                        image,
                    };
                    api.update_product(id, &update).await
                }
            };

            match result {
                Ok(product) => {
                    notifier.success(format!("Product \"{}\" saved", product.name));
                    router.navigate(&AppRoute::ProductDetail(product.id).to_path());
                }
                Err(e) => set_error_msg.set(Some(format!("Failed to save product: {}", e))),
            }
            set_is_submitting.set(false);
        });
    };

    let title = if id.is_some() { "Edit product" } else { "New product" };

    view! {
        <div class="max-w-xl mx-auto p-4">
            <div class="card bg-base-100 shadow-xl">
                <form class="card-body space-y-2" on:submit=on_submit>
                    <h1 class="card-title text-2xl">{title}</h1>
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <input
                        type="text"
                        placeholder="Name"
                        class="input input-bordered w-full"
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        prop:value=move || form.with(|f| f.name.clone())
                        required
                    />
                    <input
                        type="number"
                        step="0.01"
                        min="0"
                        placeholder="Price"
                        class="input input-bordered w-full"
                        on:input=move |ev| form.update(|f| f.price = event_target_value(&ev))
                        prop:value=move || form.with(|f| f.price.clone())
                        required
                    />
                    <textarea
                        placeholder="Description"
                        class="textarea textarea-bordered w-full"
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                        prop:value=move || form.with(|f| f.description.clone())
                    ></textarea>
                    <input
                        type="file"
                        accept="image/*"
                        class="file-input file-input-bordered w-full"
                        node_ref=file_input
                    />
                    <button class="btn btn-primary" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() { "Saving..." } else { "Save" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, price: &str) -> FormState {
        FormState {
            name: name.into(),
            price: price.into(),
            description: "  ".into(),
        }
    }

    #[test]
    fn validation_requires_name_and_positive_price() {
        assert_eq!(form("Lamp", "29.75").validate(), Ok(29.75));
        assert!(form(" ", "10").validate().is_err());
        assert!(form("Lamp", "abc").validate().is_err());
        assert!(form("Lamp", "0").validate().is_err());
    }

    #[test]
    fn blank_description_is_omitted() {
        assert_eq!(form("Lamp", "1").description(), None);
    }
}
