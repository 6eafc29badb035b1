use crate::models::resource::Resource;
use crate::views::html::escape;

/// Mirror of `#video-container`: one card per resource, in server order.
#[derive(Debug, Default, Clone)]
pub struct CatalogView {
    cards: Vec<Resource>,
}

impl CatalogView {
    /// Clears and re-fills the container.
    pub fn replace(&mut self, resources: Vec<Resource>) {
        self.cards = resources;
    }

    pub fn cards(&self) -> &[Resource] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn render(&self) -> String {
        let mut html = String::from(r#"<div id="video-container" class="flex gap-4 overflow-x-auto">"#);
        for resource in &self.cards {
            html.push_str(&render_card(resource));
        }
        html.push_str("</div>");
        html
    }
}

pub fn render_card(r: &Resource) -> String {
    format!(
        r#"<div class="w-72 flex-shrink-0 bg-white shadow rounded-xl p-3 relative" data-resource-id="{id}">
  <span class="absolute top-2 right-2 bg-blue-500 text-white text-xs px-2 py-1 rounded" data-level="{level}">{label}</span>
  <iframe class="w-full h-40 rounded-lg mb-2" src="{src}" allowfullscreen></iframe>
  <h3 class="font-semibold text-gray-800">{title}</h3>
  <p class="text-sm text-gray-600 line-clamp-2">{description}</p>
  <div class="flex justify-between mt-2">
    <button class="edit-resource-btn text-yellow-600 text-sm" data-resource-id="{id}">Edit</button>
    <button class="delete-resource-btn text-red-600 text-sm" data-resource-id="{id}">Delete</button>
  </div>
</div>"#,
        id = r.id,
        level = r.level.as_str(),
        label = r.level.label(),
        src = escape(&r.embed_url()),
        title = escape(&r.title),
        description = escape(&r.description),
    )
}
